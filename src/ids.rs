//! Identifier generation for stored entities.

use uuid::Uuid;

/// Source of fresh identifiers, held by a [`ResourceActor`](crate::actor_framework::ResourceActor).
///
/// Any `Fn() -> Id` closure qualifies, which keeps tests free to hand out
/// predictable ids.
pub trait IdGenerator<Id>: Send + Sync + 'static {
    fn next_id(&self) -> Id;
}

impl<Id, F> IdGenerator<Id> for F
where
    F: Fn() -> Id + Send + Sync + 'static,
{
    fn next_id(&self) -> Id {
        self()
    }
}

/// Random 128-bit identifiers rendered in hyphenated UUID form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator<String> for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
