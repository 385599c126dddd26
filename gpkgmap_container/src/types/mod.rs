mod feature_row;
mod scoped_cursor;
mod tile;
mod traits;

pub use feature_row::*;
pub use scoped_cursor::*;
pub use tile::*;
pub use traits::*;
