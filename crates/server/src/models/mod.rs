//! Domain models for the API.

pub mod color;
pub mod contact;
pub mod content;
pub mod post;
pub mod session;
pub mod site_info;
pub mod user;

pub use color::{ColorConfig, ColorUpsert};
pub use contact::{Contact, ContactDraft, ContactPatch};
pub use content::{
    CardDraft, CardPatch, Feature, Reason, ReorderRequest, Slide, SlideDraft, SlidePatch,
};
pub use post::{Post, PostAuthor, PostDraft, PostPage, PostPatch, PostRow};
pub use session::{Claims, SessionUser};
pub use site_info::{SiteInfo, SiteInfoPatch};
pub use user::{User, UserPatch};
