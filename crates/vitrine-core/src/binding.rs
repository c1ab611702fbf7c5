//! Interaction → state transition map.
//!
//! Hosts translate raw DOM events into [`UiEvent`]s and feed them to
//! [`dispatch`]. The returned [`EventResponse`] tells the host what to do with
//! the incoming DOM event and which render ticket, if any, to schedule.

use tracing::trace;

use crate::card::CardSlot;
use crate::controller::CatalogController;
use crate::scheduler::RenderTicket;
use crate::state::{CategoryFilter, SortMode};
use crate::store::PreferenceStore;
use crate::view::CatalogView;

/// A user interaction, already reduced to the data the controller needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A sort control with this `data-sort` value was clicked.
    SortClicked(String),
    /// A filter control with this `data-category` value was clicked.
    FilterClicked(String),
    /// The search input now holds this text.
    SearchInput(String),
    /// The favorite toggle for this product id was clicked.
    FavoriteClicked(String),
    /// A navigation link with this `href` was clicked.
    NavClicked(String),
    /// The "go to catalog" affordance was clicked.
    GoToCatalog,
    /// A key went down while the card at `card` had focus.
    CardKey { card: CardSlot, key: String },
}

/// What the host must do after a dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Call `preventDefault()` on the source event.
    pub prevent_default: bool,
    /// Call `stopPropagation()` on the source event.
    pub stop_propagation: bool,
    /// Schedule [`CatalogController::commit_render`] for this ticket.
    pub render: Option<RenderTicket>,
    /// Programmatically click the favorite toggle inside this card.
    pub activate_favorite: Option<CardSlot>,
}

impl EventResponse {
    fn render(ticket: Option<RenderTicket>) -> Self {
        Self {
            render: ticket,
            ..Self::default()
        }
    }
}

/// Page id from a link's fragment (`"#catalog"` → `"catalog"`).
///
/// `None` for links without a fragment or with an empty one.
#[must_use]
pub fn fragment_target(href: &str) -> Option<&str> {
    href.split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

/// Enter and Space activate a focused card.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Apply `event` to `controller`.
pub fn dispatch<S, V>(controller: &mut CatalogController<S, V>, event: UiEvent) -> EventResponse
where
    S: PreferenceStore,
    V: CatalogView,
{
    trace!(?event, "dispatch");
    match event {
        UiEvent::SortClicked(value) => {
            EventResponse::render(controller.set_sort(SortMode::parse(&value)))
        }
        UiEvent::FilterClicked(value) => {
            EventResponse::render(controller.set_filter(CategoryFilter::parse(&value)))
        }
        UiEvent::SearchInput(text) => EventResponse::render(controller.set_search(&text)),
        UiEvent::FavoriteClicked(id) => {
            controller.toggle_favorite(&id);
            EventResponse {
                stop_propagation: true,
                ..EventResponse::default()
            }
        }
        UiEvent::NavClicked(href) => EventResponse {
            prevent_default: true,
            render: fragment_target(&href).and_then(|page| controller.show_page(page)),
            ..EventResponse::default()
        },
        UiEvent::GoToCatalog => {
            let catalog = controller.config().catalog_page.clone();
            EventResponse {
                prevent_default: true,
                render: controller.show_page(&catalog),
                ..EventResponse::default()
            }
        }
        UiEvent::CardKey { card, key } => {
            if is_activation_key(&key) {
                EventResponse {
                    prevent_default: true,
                    activate_favorite: Some(card),
                    ..EventResponse::default()
                }
            } else {
                EventResponse::default()
            }
        }
    }
}
