//! # SkillSwap Client
//!
//! Typed access to the SkillSwap HTTP API, reusing the server's model types.
//!
//! ```ignore
//! use skillswap_client::{ApiClient, Session};
//!
//! let session = Session::new(ApiClient::new("http://localhost:5000/api")?);
//! session.login("ada@example.com", "secret123").await?;
//!
//! for request in session.received().await? {
//!     println!("{} from {}", request.status, request.from_user.id());
//! }
//! ```

pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::ApiClient;
pub use error::{ClientError, Result};
pub use session::Session;
pub use types::{AuthResult, Envelope, counterpart, exclude_user, is_match};
