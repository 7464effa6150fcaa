//! # Herald Tasks
//!
//! Fire-and-forget background work with panic isolation and a graceful
//! shutdown barrier.
//!
//! Handlers use a shared [`Supervisor`] for work that should outlive the
//! response (sending mail, warming caches). A panicking task is logged with
//! its name and payload and never takes the process down. On shutdown the
//! server calls [`Supervisor::wait`] (or [`Supervisor::shutdown`] with a
//! deadline) so no work in flight is dropped.
//!
//! ```rust,no_run
//! use herald_tasks::Supervisor;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let supervisor = Supervisor::new();
//!
//!     for user_id in 1..=3 {
//!         supervisor.launch(format!("welcome-email-{user_id}"), async move {
//!             // deliver mail for user_id
//!         });
//!     }
//!
//!     supervisor.launch("flaky", async {
//!         panic!("smtp connection reset");
//!     });
//!
//!     assert!(supervisor.shutdown(Duration::from_secs(30)).await);
//!     assert_eq!(supervisor.stats().panicked(), 1);
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/herald-tasks/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod stats;
mod supervisor;

pub use stats::TaskStats;
pub use supervisor::Supervisor;
