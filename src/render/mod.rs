//! Render output: page visuals and clipboard serialization

mod clipboard;
mod visual;

pub use clipboard::{ClipboardPlugin, ClipboardSerializer, DomSerializer, FragmentSerializer};
pub use visual::{page_visuals, render_page_view, PageChrome, PageVisual, PAGE_BORDER};
