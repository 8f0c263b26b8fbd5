mod home;
pub use home::Home;

mod profile;
pub use profile::Profile;

mod post;
pub use post::SinglePost;
