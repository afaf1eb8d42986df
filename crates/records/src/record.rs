//! The persisted-record contract shared by every planning/production/stock record.

use plantops_core::{DomainError, DomainResult, Entity, RecordId};

/// A storable record.
///
/// Storage assigns ids; the domain only describes how a record is built from
/// its creation payload, how partial updates apply, and what makes it valid.
/// All three are pure.
pub trait Record: Entity<Id = RecordId> + Clone + Send + Sync + 'static {
    /// Creation payload (everything but the id).
    type New: Clone + Send + Sync + 'static;
    /// Partial update: `None` leaves a field unchanged.
    type Patch: Clone + Send + Sync + 'static;

    /// Short resource name used in errors and logs.
    const KIND: &'static str;

    fn from_new(id: RecordId, new: Self::New) -> Self;

    fn apply_patch(&mut self, patch: Self::Patch);

    fn validate(&self) -> DomainResult<()>;
}

/// Copy every `Some` field of a patch onto the target.
///
/// Fields listed after `;` are optional on the target (`Option<T>`) and are set
/// to `Some(value)`.
macro_rules! apply_patch_fields {
    ($target:expr, $patch:expr, [$($field:ident),* $(,)?]) => {
        $(
            if let Some(v) = $patch.$field {
                $target.$field = v;
            }
        )*
    };
    ($target:expr, $patch:expr, [$($field:ident),* $(,)?]; [$($opt:ident),* $(,)?]) => {
        apply_patch_fields!($target, $patch, [$($field),*]);
        $(
            if let Some(v) = $patch.$opt {
                $target.$opt = Some(v);
            }
        )*
    };
}

pub(crate) use apply_patch_fields;

pub(crate) fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

pub(crate) fn require_month(month: u32) -> DomainResult<()> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::validation(format!("month must be in 1..=12, got {month}")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

pub(crate) fn require_finite(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a finite number")));
    }
    Ok(())
}
