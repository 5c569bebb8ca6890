use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::ids::IdGenerator;

/// Attempts at drawing an unused id before an insert is rejected.
const MAX_ID_ATTEMPTS: usize = 8;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and DTOs)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;
    type CreatePayload: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Entity rejected: {0}")]
    Rejected(String),
    #[error("Could not allocate an unused id after {0} attempts")]
    IdExhausted(usize),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    ReplaceAll {
        payloads: Vec<T::CreatePayload>,
        respond_to: Response<usize>,
    },
    Clear {
        respond_to: Response<()>,
    },
    #[cfg(test)]
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the canonical records. Requests are handled one at a time, so every
/// reply reflects a state in which each write is either fully applied or not
/// applied at all.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    ids: Box<dyn IdGenerator<T::Id>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, ids: impl IdGenerator<T::Id>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            store: HashMap::new(),
            order: Vec::new(),
            ids: Box::new(ids),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("Store actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
                ResourceRequest::ReplaceAll { payloads, respond_to } => {
                    let _ = respond_to.send(self.handle_replace_all(payloads));
                }
                ResourceRequest::Clear { respond_to } => {
                    self.store.clear();
                    self.order.clear();
                    debug!("Store cleared");
                    let _ = respond_to.send(Ok(()));
                }
                #[cfg(test)]
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }
        info!(records = self.store.len(), "Store actor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let id = self.fresh_id(None)?;
        let item = Self::build(id, payload)?;
        self.order.push(item.id().clone());
        self.store.insert(item.id().clone(), item.clone());
        Ok(item)
    }

    /// Builds the replacement contents off to the side and swaps them in only
    /// once every payload has been accepted.
    fn handle_replace_all(&mut self, payloads: Vec<T::CreatePayload>) -> Result<usize, FrameworkError> {
        let mut store = HashMap::with_capacity(payloads.len());
        let mut order = Vec::with_capacity(payloads.len());
        for payload in payloads {
            let id = self.fresh_id(Some(&store))?;
            let item = Self::build(id, payload)?;
            order.push(item.id().clone());
            store.insert(item.id().clone(), item);
        }
        let replaced = self.store.len();
        self.store = store;
        self.order = order;
        info!(replaced, loaded = self.store.len(), "Store contents replaced");
        Ok(self.store.len())
    }

    fn build(id: T::Id, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        let mut item = T::from_create(id, payload).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        Ok(item)
    }

    /// Draws an id that is used neither by the live store nor by `pending`.
    fn fresh_id(&self, pending: Option<&HashMap<T::Id, T>>) -> Result<T::Id, FrameworkError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id();
            let taken = self.store.contains_key(&id)
                || pending.is_some_and(|p| p.contains_key(&id));
            if !taken {
                return Ok(id);
            }
            warn!(%id, "Generated id already in use, drawing another");
        }
        Err(FrameworkError::IdExhausted(MAX_ID_ATTEMPTS))
    }

    fn snapshot(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.store.get(id).cloned())
            .collect()
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    #[cfg(test)]
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Stores a new entity under a freshly generated id and returns it.
    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    /// Copies every stored entity, in insertion order.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    /// Swaps the whole store for `payloads`, each under a fresh id. Returns the
    /// number of stored entities afterwards.
    pub async fn replace_all(&self, payloads: Vec<T::CreatePayload>) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::ReplaceAll { payloads, respond_to }).await
    }

    pub async fn clear(&self) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Clear { respond_to }).await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    impl Entity for Note {
        type Id = String;
        type CreatePayload = String;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create(id: String, text: String) -> Result<Self, String> {
            if text == "reject" {
                return Err("rejected by hook".to_string());
            }
            Ok(Self { id, text })
        }
    }

    fn sequential_ids() -> impl Fn() -> String + Send + Sync + 'static {
        let counter = Arc::new(AtomicU64::new(1));
        move || format!("note_{}", counter.fetch_add(1, Ordering::SeqCst))
    }

    fn start() -> ResourceClient<Note> {
        let (actor, client) = ResourceActor::new(10, sequential_ids());
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_get_returns_copy() {
        let client = start();

        let note = client.create("hello".to_string()).await.unwrap();
        assert_eq!(note.id(), "note_1");

        let fetched = client.get(note.id.clone()).await.unwrap();
        assert_eq!(fetched, Some(note));

        assert_eq!(client.get("missing".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let client = start();
        for text in ["a", "b", "c"] {
            client.create(text.to_string()).await.unwrap();
        }

        let texts: Vec<String> = client.list().await.unwrap().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(client.list().await.unwrap(), client.list().await.unwrap());
    }

    #[tokio::test]
    async fn test_replace_all_swaps_contents_with_fresh_ids() {
        let client = start();
        let old = client.create("old".to_string()).await.unwrap();

        let loaded = client.replace_all(vec!["x".to_string(), "y".to_string()]).await.unwrap();
        assert_eq!(loaded, 2);

        let notes = client.list().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.id != old.id));
        assert_eq!(client.get(old.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_replace_all_leaves_store_untouched() {
        let client = start();
        client.create("keep".to_string()).await.unwrap();

        let result = client.replace_all(vec!["x".to_string(), "reject".to_string()]).await;
        assert_eq!(result, Err(FrameworkError::Rejected("rejected by hook".to_string())));

        let notes = client.list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "keep");
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let client = start();
        client.create("a".to_string()).await.unwrap();
        client.create("b".to_string()).await.unwrap();

        client.clear().await.unwrap();
        assert_eq!(client.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_colliding_generator_is_detected() {
        let (actor, client) = ResourceActor::<Note>::new(10, || "same".to_string());
        tokio::spawn(actor.run());

        client.create("first".to_string()).await.unwrap();
        let second = client.create("second".to_string()).await;
        assert_eq!(second, Err(FrameworkError::IdExhausted(MAX_ID_ATTEMPTS)));
        assert_eq!(client.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_requests_fail_once_actor_is_gone() {
        let (actor, client) = ResourceActor::<Note>::new(10, sequential_ids());
        drop(actor);

        let result = client.list().await;
        assert_eq!(result, Err(FrameworkError::ActorClosed));
    }
}
