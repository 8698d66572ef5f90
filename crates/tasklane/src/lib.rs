//! # Tasklane Architecture
//!
//! Tasklane is a **UI-agnostic task engine**. It holds the data model and the
//! rules of a personal to-do manager (recurring tasks, subtasks, tags,
//! filtering, statistics, import/export) and leaves every screen to its client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade for UI clients                               │
//! │  - Resolves ids, persists after every mutation              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (mutations, recurrence, filter, reorder, stats, ...) │
//! │  - Pure functions over Task values                          │
//! │  - Never mutate their input, return new values              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, codec.rs)                           │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! │  - One JSON array under one key                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Values, Not Handles
//!
//! Every mutator takes `&Task` and returns a new [`model::Task`]; collection
//! operations take `&[Task]` and return a new `Vec<Task>`. Callers replace
//! their collection with the result. The one operation with a side effect on
//! storage is [`recurrence::complete_task`], which appends the next occurrence
//! of a recurring task to the store.
//!
//! ## Testing Strategy
//!
//! - **Engine modules**: unit tests over plain values, with `_at(now)`
//!   variants pinning the clock.
//! - **Store and API**: [`store::InMemoryStore`] for logic, `TestEnv`
//!   (`test_utils`, also behind the `test_utils` feature) for a file store in
//!   a temporary directory.
//! - **Integration** (`tests/`): the file backend and the facade end to end.

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod id;
pub mod model;
pub mod mutations;
pub mod options;
pub mod recurrence;
pub mod reorder;
pub mod samples;
pub mod stats;
pub mod store;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
pub mod transfer;
