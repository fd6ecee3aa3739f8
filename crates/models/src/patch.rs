//! Partial updates.
//!
//! A patch carries `Option` fields; only the `Some` ones are written into the
//! active model, everything else keeps its stored value.

use sea_orm::ActiveModelTrait;

pub trait Patch<A: ActiveModelTrait>: Send {
    /// Mark every present field as `Set` on `active`.
    fn apply(self, active: &mut A);

    /// True when no field is present.
    fn is_empty(&self) -> bool;
}
