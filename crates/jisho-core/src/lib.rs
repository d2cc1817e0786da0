pub mod command;
pub mod display;
pub mod error;
pub mod formatter;
pub mod pagination;
pub mod router;

pub use command::{Command, parse_command};
pub use display::MessageDisplay;
pub use error::{DisplayError, NavigationError, SessionError};
pub use formatter::{Page, format_entry};
pub use pagination::PaginationSession;
pub use router::{Dispatch, NavigationControls, NavigationRouter};
