//! # SkillSwap Models
//!
//! Domain models, DTOs and lifecycle rules for the SkillSwap API.
//!
//! # Modules
//!
//! - [`auth`]: login request and token responses
//! - [`ids`]: typed identifiers
//! - [`swap_requests`]: ledger rows, views and the status machine
//! - [`users`]: profiles, signup/update DTOs and per-path projections
//! - [`value_types`]: validated primitives such as [`Email`]

pub mod auth;
pub mod ids;
pub mod swap_requests;
pub mod users;
pub mod value_types;

pub use auth::{AuthResponse, LoginRequest};
pub use ids::{SwapRequestId, UserId};
pub use swap_requests::{
    CreateSwapRequestDto, SwapRequest, SwapRequestData, SwapRequestResponse, SwapRequestView,
    SwapRequestsData, SwapRequestsResponse, SwapStatus, TransitionError, UpdateSwapStatusDto,
    UserRef,
};
pub use users::{
    NewUser, ProfileChanges, PublicProfile, SignupDto, SocialLinks, UpdateProfileDto, User,
    UserCard, UserData, UserFilterParams, UserProjection, UserResponse, UserSummary,
    UserWithPassword, UsersData, UsersResponse,
};
pub use value_types::{Email, ValueTypeError};
