//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top bar with the app name, theme and download spinner
//! - `LandingPage` / `AboutPage`: Static pages
//! - `NoticeOverlay`: Popup for the current `Notice`
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep a cursor and turn keys into their own events:
//! - `Sidebar`: Subjects and the fixed navigation entries
//! - `SubjectView`: Topic tabs and the resource list
//! - `QuizViewState`: Quiz menu, question options, results
//! - `DownloadsView`: The downloads directory
//! - `SearchViewState`: Resource search hits
//! - `Prompt`: One-line text entry overlay
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (constructor arguments or
//! handler parameters), not by reaching into `App`. The event loop maps
//! each component event onto a `core::action::Action`.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top bar)
//! ├── sidebar.rs       (navigation)
//! ├── landing.rs       (home + about pages)
//! ├── subject_view.rs  (topics + resources)
//! ├── quiz_view.rs     (menu, question, results)
//! ├── downloads.rs     (downloads manager)
//! ├── search_view.rs   (search results)
//! ├── prompt.rs        (text entry overlay)
//! └── notice.rs        (notice overlay)
//! ```

pub mod downloads;
pub mod landing;
pub mod notice;
pub mod prompt;
pub mod quiz_view;
pub mod search_view;
pub mod sidebar;
pub mod subject_view;
mod title_bar;

pub use downloads::{DownloadsEvent, DownloadsState, DownloadsView};
pub use landing::{AboutPage, LandingPage};
pub use notice::NoticeOverlay;
pub use prompt::{Prompt, PromptEvent, PromptPurpose};
pub use quiz_view::{QuizEvent, QuizViewState};
pub use search_view::{SearchEvent, SearchViewState};
pub use sidebar::{Sidebar, SidebarItem, SidebarState};
pub use subject_view::{SubjectEvent, SubjectView, SubjectViewState};
pub use title_bar::TitleBar;
