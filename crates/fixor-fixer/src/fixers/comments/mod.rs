//! Comment fixers

mod single_line_comment_spacing;

pub use single_line_comment_spacing::SingleLineCommentSpacingFixer;
