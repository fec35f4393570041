use crate::feed::intent::FeedIntent;
use crate::feed::state::{FeedState, LoadKind};
use crate::mvi::Reducer;

pub struct FeedReducer;

impl Reducer for FeedReducer {
    type State = FeedState;
    type Intent = FeedIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FeedIntent::InitialLoadStarted => {
                state.loading = Some(LoadKind::Initial);
                state.error = None;
            }
            FeedIntent::MoreLoadStarted => {
                state.loading = Some(LoadKind::More);
            }
            FeedIntent::Reset => {
                state.current_page = 0;
                state.has_more = true;
            }
            FeedIntent::InitialPageLoaded { items } => {
                state.has_more = items.len() == state.page_size;
                state.items = items;
                state.current_page = 1;
            }
            FeedIntent::MorePageLoaded { items } => {
                state.has_more = items.len() == state.page_size;
                state.items.extend(items);
                state.current_page += 1;
            }
            FeedIntent::LoadFailed { message } => {
                state.error = Some(message);
            }
            FeedIntent::LoadFinished => {
                state.loading = None;
            }
            FeedIntent::ItemLiked { id } => {
                if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                    item.register_like();
                }
            }
            FeedIntent::ItemCreated { item } => {
                state.items.insert(0, item);
            }
        }
        state
    }
}
