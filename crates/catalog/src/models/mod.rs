mod book;
mod creator;
mod format;

pub use self::book::Book;
pub(crate) use self::book::epoch;
pub use self::creator::Creator;
pub use self::format::Format;
