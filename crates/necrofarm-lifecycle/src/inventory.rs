//! Exact-decimal balance checks and deductions on the farm inventory.
//!
//! Balances are [`Decimal`] so repeated small deductions never drift. A
//! balance that reaches zero is removed from the map.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use necrofarm_types::Resource;

use crate::error::LifecycleError;

/// Check whether the inventory holds at least `amount` of `resource`.
pub fn has_resource(
    inventory: &BTreeMap<Resource, Decimal>,
    resource: Resource,
    amount: Decimal,
) -> bool {
    balance(inventory, resource) >= amount
}

/// Balance of `resource`, zero when absent.
pub fn balance(inventory: &BTreeMap<Resource, Decimal>, resource: Resource) -> Decimal {
    inventory.get(&resource).copied().unwrap_or(Decimal::ZERO)
}

/// Fail with [`LifecycleError::InsufficientResource`] unless the inventory
/// holds at least `amount` of `resource`.
pub fn require_resource(
    inventory: &BTreeMap<Resource, Decimal>,
    resource: Resource,
    amount: Decimal,
) -> Result<(), LifecycleError> {
    let available = balance(inventory, resource);
    if available < amount {
        return Err(LifecycleError::InsufficientResource {
            resource,
            requested: amount,
            available,
        });
    }
    Ok(())
}

/// Remove `amount` of `resource` from the inventory.
///
/// Fails without touching the map if the balance is too low.
pub fn remove_resource(
    inventory: &mut BTreeMap<Resource, Decimal>,
    resource: Resource,
    amount: Decimal,
) -> Result<(), LifecycleError> {
    require_resource(inventory, resource, amount)?;

    let remaining = balance(inventory, resource)
        .checked_sub(amount)
        .ok_or_else(|| LifecycleError::overflow("subtraction underflow in remove_resource"))?;

    if remaining.is_zero() {
        inventory.remove(&resource);
    } else {
        inventory.insert(resource, remaining);
    }

    Ok(())
}
