//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* interaction state and turns it into cells on
//! the terminal. No interaction logic lives here.

pub mod card_list;
pub mod layout;
pub mod preview_pane;
pub mod smooth_scroll;
pub mod theme;
