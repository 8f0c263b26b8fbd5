mod home;
pub use home::HomeView;

mod profile;
pub use profile::{username_from_slug, ProfileView};

mod post;
pub use post::PostDetailView;
