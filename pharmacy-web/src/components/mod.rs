pub mod cart_drawer;
pub mod field;
pub mod footer;
pub mod modal;
pub mod navbar;
pub mod notice;
pub mod product_card;
pub mod status_badge;

pub use cart_drawer::CartDrawer;
pub use field::FormField;
pub use footer::Footer;
pub use modal::Modal;
pub use navbar::Navbar;
pub use notice::{Notice, NoticeBanner, Tone};
pub use product_card::{CardLayout, ProductCard};
pub use status_badge::StatusBadge;
