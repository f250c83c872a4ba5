//! Template tag extraction for tagshield.
//!
//! Scans HTML documents that embed `{% ... %}` and `{{ ... }}` template tags,
//! replaces every tag with a placeholder the HTML formatter treats as opaque,
//! and records what it needs to put the tags back afterwards:
//!
//! ```text
//! <div {% if x %}class="a"{% endif %}>   ->   <div __TAG_0__class="a"__TAG_1__>
//! {{ title }}                             ->   <!--__TAG_2__-->
//! ```
//!
//! Tags found directly in document content become HTML-comment placeholders;
//! tags inside an HTML tag or a quoted attribute value become bare tokens so
//! they remain valid where they landed.

pub mod line_map;
pub mod nesting;
pub mod normalize;
pub mod placeholder;
pub mod scanner;

pub use line_map::LineMap;
pub use nesting::NestingTable;
pub use normalize::{QuoteEscape, normalize, normalize_with};
pub use placeholder::{
    PLACEHOLDER_MARKER, Placement, PlaceholderMapping, RenderMode, TagRecord, marker_for,
};
pub use scanner::{Delimiter, Frame, ScanOutput, VOID_ELEMENTS, scan};
