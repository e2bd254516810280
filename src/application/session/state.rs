//! Search session state and its pure update function.

use crate::application::services::search_service::{Origin, Resolution};
use crate::domain::entities::{College, CompareSelection, SearchParams};
use crate::domain::fields::SearchField;
use crate::domain::projection::{
    Page, ResultStats, SortKey, clamp_page, compute_stats, project, sort_colleges,
};
use crate::domain::query::{CanonicalQuery, build_query};

/// What the result area is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Status {
    /// No query entered.
    #[default]
    Idle,
    Loading,
    Results,
    /// The query was answered with an empty list.
    NoResults,
    /// The fetch task died before producing an answer.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient, dismissable message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub params: SearchParams,
    /// Canonical form of `params` as of the last edit.
    pub query: CanonicalQuery,
    /// 1-based.
    pub page: usize,
    pub sort: SortKey,
    pub results: Vec<College>,
    pub origin: Origin,
    pub loading: bool,
    /// Id of the most recently issued fetch; answers tagged otherwise are stale.
    pub latest_request_id: u64,
    pub status: Status,
    pub notice: Option<Notice>,
    pub compare: CompareSelection,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// The visible page of the sorted results.
    pub fn page_view(&self) -> Page {
        project(&self.results, self.sort, self.page)
    }

    /// All results in display order, unpaginated.
    pub fn sorted_results(&self) -> Vec<College> {
        sort_colleges(&self.results, self.sort)
    }

    pub fn stats(&self) -> ResultStats {
        compute_stats(&self.results)
    }

    /// Drops results and invalidates whatever fetch is still in flight.
    fn reset_results(&mut self) {
        self.results.clear();
        self.origin = Origin::Remote;
        self.loading = false;
        self.latest_request_id += 1;
        self.status = Status::Idle;
        self.page = 1;
        self.clear_info_notice();
    }

    /// Drops an informational notice; error notices stay until dismissed.
    fn clear_info_notice(&mut self) {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.kind == NoticeKind::Info)
        {
            self.notice = None;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetField(SearchField, String),
    ClearForm,
    /// The debounce window for `query` elapsed.
    QuerySettled(CanonicalQuery),
    ResultsArrived {
        request_id: u64,
        resolution: Resolution,
    },
    FetchAborted {
        request_id: u64,
    },
    SetSort(SortKey),
    SetPage(usize),
    NextPage,
    PrevPage,
    CompareAdd(College),
    CompareRemove(String),
    CompareClear,
    DismissNotice,
}

/// Side effects requested by [`update`]; the driver carries them out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleDebounce(CanonicalQuery),
    CancelDebounce,
    Fetch {
        request_id: u64,
        query: CanonicalQuery,
    },
}

/// Applies `action` to `state`.
pub fn update(mut state: SearchState, action: Action) -> (SearchState, Vec<Effect>) {
    let mut effects = Vec::new();

    match action {
        Action::SetField(field, value) => {
            if state.params.get(field) != value {
                state.params.set(field, value);
                state.page = 1;
            }

            let query = build_query(&state.params);
            if query != state.query {
                state.query = query;
                if state.query.is_empty() {
                    effects.push(Effect::CancelDebounce);
                    state.reset_results();
                } else {
                    effects.push(Effect::ScheduleDebounce(state.query.clone()));
                }
            }
        }

        Action::ClearForm => {
            state.params = SearchParams::new();
            state.query = CanonicalQuery::default();
            state.notice = None;
            state.reset_results();
            effects.push(Effect::CancelDebounce);
        }

        Action::QuerySettled(query) => {
            // A settle for anything but the current form is left over from
            // before the last edit.
            if query == state.query && !query.is_empty() {
                state.latest_request_id += 1;
                state.loading = true;
                state.status = Status::Loading;
                effects.push(Effect::Fetch {
                    request_id: state.latest_request_id,
                    query,
                });
            }
        }

        Action::ResultsArrived {
            request_id,
            resolution,
        } => {
            if request_id == state.latest_request_id {
                state.loading = false;
                state.status = if resolution.colleges.is_empty() {
                    Status::NoResults
                } else {
                    Status::Results
                };
                state.page = clamp_page(state.page, resolution.colleges.len());

                match (&resolution.origin, &resolution.cause) {
                    (Origin::Fallback, Some(cause)) => {
                        state.notice = Some(Notice::info(format!(
                            "Showing local results ({cause})"
                        )));
                    }
                    (Origin::Fallback, None) => {
                        state.notice = Some(Notice::info("Showing local results"));
                    }
                    (Origin::Remote, _) => state.clear_info_notice(),
                }

                state.origin = resolution.origin;
                state.results = resolution.colleges;
            }
        }

        Action::FetchAborted { request_id } => {
            if request_id == state.latest_request_id {
                state.loading = false;
                state.status = Status::Failed;
                state.notice = Some(Notice::error("Search failed, please try again"));
            }
        }

        Action::SetSort(sort) => {
            if sort != state.sort {
                state.sort = sort;
                state.page = 1;
            }
        }

        Action::SetPage(page) => state.page = page.max(1),

        Action::NextPage => {
            state.page = clamp_page(state.page.saturating_add(1), state.results.len())
        }

        Action::PrevPage => {
            state.page = clamp_page(state.page.saturating_sub(1), state.results.len())
        }

        Action::CompareAdd(college) => {
            if let Err(e) = state.compare.add(college) {
                state.notice = Some(Notice::error(e.to_string()));
            }
        }

        Action::CompareRemove(name) => {
            state.compare.remove(&name);
        }

        Action::CompareClear => state.compare.clear(),

        Action::DismissNotice => state.notice = None,
    }

    (state, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn college(name: &str) -> College {
        College::new(name, 1900, "Springfield", "Ohio", "")
    }

    fn edit(state: SearchState, field: SearchField, value: &str) -> (SearchState, Vec<Effect>) {
        update(state, Action::SetField(field, value.to_string()))
    }

    fn settle(state: SearchState) -> (SearchState, u64) {
        let query = state.query.clone();
        let (state, effects) = update(state, Action::QuerySettled(query));
        let id = match effects.as_slice() {
            [Effect::Fetch { request_id, .. }] => *request_id,
            other => panic!("expected a single fetch, got {other:?}"),
        };
        (state, id)
    }

    fn remote(colleges: Vec<College>) -> Resolution {
        Resolution {
            colleges,
            origin: Origin::Remote,
            cause: None,
        }
    }

    #[test]
    fn test_edit_schedules_debounce() {
        let (state, effects) = edit(SearchState::new(), SearchField::Name, "Harv");

        assert_eq!(state.query.to_query_string(), "name=Harv");
        assert_eq!(effects, vec![Effect::ScheduleDebounce(state.query.clone())]);
        assert!(!state.loading);
    }

    #[test]
    fn test_whitespace_edit_schedules_nothing() {
        let (state, _) = edit(SearchState::new(), SearchField::Name, "Harv");
        let (state, effects) = edit(state, SearchField::Name, "  Harv ");

        assert!(effects.is_empty());
        assert_eq!(state.params.get(SearchField::Name), "  Harv ");
    }

    #[test]
    fn test_settle_issues_fetch_and_sets_loading() {
        let (state, _) = edit(SearchState::new(), SearchField::State, "Texas");
        let (state, id) = settle(state);

        assert_eq!(id, state.latest_request_id);
        assert!(state.loading);
        assert_eq!(state.status, Status::Loading);
    }

    #[test]
    fn test_outdated_settle_is_ignored() {
        let (state, _) = edit(SearchState::new(), SearchField::State, "Tex");
        let outdated = state.query.clone();
        let (state, _) = edit(state, SearchField::State, "Texas");

        let (state, effects) = update(state, Action::QuerySettled(outdated));

        assert!(effects.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let (state, _) = edit(SearchState::new(), SearchField::Name, "Har");
        let (state, first) = settle(state);
        let (state, _) = edit(state, SearchField::Name, "Yale");
        let (state, second) = settle(state);

        let (state, _) = update(
            state,
            Action::ResultsArrived {
                request_id: second,
                resolution: remote(vec![college("Yale University")]),
            },
        );
        let (state, _) = update(
            state,
            Action::ResultsArrived {
                request_id: first,
                resolution: remote(vec![college("Harvard University")]),
            },
        );

        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].name, "Yale University");
        assert!(!state.loading);
        assert_eq!(state.status, Status::Results);
    }

    #[test]
    fn test_empty_answer_is_no_results() {
        let (state, _) = edit(SearchState::new(), SearchField::Name, "Hogwarts");
        let (state, id) = settle(state);

        let (state, _) = update(
            state,
            Action::ResultsArrived {
                request_id: id,
                resolution: remote(Vec::new()),
            },
        );

        assert_eq!(state.status, Status::NoResults);
        assert!(!state.loading);
    }

    #[test]
    fn test_fallback_sets_info_notice() {
        let (state, _) = edit(SearchState::new(), SearchField::Name, "Rice");
        let (state, id) = settle(state);

        let (state, _) = update(
            state,
            Action::ResultsArrived {
                request_id: id,
                resolution: Resolution {
                    colleges: vec![college("Rice University")],
                    origin: Origin::Fallback,
                    cause: Some(AppError::network("connection refused")),
                },
            },
        );

        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert!(notice.message.contains("connection refused"));
        assert_eq!(state.origin, Origin::Fallback);
    }

    #[test]
    fn test_clearing_form_cancels_and_invalidates() {
        let (state, _) = edit(SearchState::new(), SearchField::Name, "Har");
        let (state, in_flight) = settle(state);

        let (state, effects) = update(state, Action::ClearForm);
        assert_eq!(effects, vec![Effect::CancelDebounce]);
        assert!(!state.loading);
        assert_eq!(state.status, Status::Idle);

        let (state, _) = update(
            state,
            Action::ResultsArrived {
                request_id: in_flight,
                resolution: remote(vec![college("Harvard University")]),
            },
        );
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_blanking_last_field_cancels_debounce() {
        let (state, _) = edit(SearchState::new(), SearchField::City, "Austin");
        let (state, effects) = edit(state, SearchField::City, "   ");

        assert_eq!(effects, vec![Effect::CancelDebounce]);
        assert!(state.query.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_blanking_last_field_drops_fallback_notice() {
        let (state, _) = edit(SearchState::new(), SearchField::City, "Austin");
        let (state, id) = settle(state);
        let (state, _) = update(
            state,
            Action::ResultsArrived {
                request_id: id,
                resolution: Resolution {
                    colleges: vec![college("Rice University")],
                    origin: Origin::Fallback,
                    cause: None,
                },
            },
        );
        assert!(state.notice.is_some());

        let (state, _) = edit(state, SearchField::City, "");

        assert_eq!(state.status, Status::Idle);
        assert!(state.notice.is_none());
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_blanking_last_field_keeps_error_notice() {
        let mut state = SearchState::new();
        for name in ["A", "B", "C", "D"] {
            state = update(state, Action::CompareAdd(college(name))).0;
        }
        let (state, _) = edit(state, SearchField::City, "Austin");
        let (state, _) = edit(state, SearchField::City, "");

        assert_eq!(state.notice.map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn test_field_change_resets_page() {
        let mut state = SearchState::new();
        state.results = (0..30).map(|i| college(&format!("College {i:02}"))).collect();
        let (state, _) = update(state, Action::SetPage(3));
        assert_eq!(state.page, 3);

        let (state, _) = edit(state, SearchField::State, "Ohio");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut state = SearchState::new();
        state.results = (0..25).map(|i| college(&format!("College {i:02}"))).collect();

        let (state, _) = update(state, Action::PrevPage);
        assert_eq!(state.page, 1);

        let (state, _) = update(state, Action::NextPage);
        let (state, _) = update(state, Action::NextPage);
        let (state, _) = update(state, Action::NextPage);
        assert_eq!(state.page, 3);
        assert_eq!(state.page_view().items.len(), 1);

        let (state, _) = update(state, Action::SetPage(9));
        assert!(state.page_view().items.is_empty());
    }

    #[test]
    fn test_next_page_from_huge_page_clamps() {
        let mut state = SearchState::new();
        state.results = (0..25).map(|i| college(&format!("College {i:02}"))).collect();

        let (state, _) = update(state, Action::SetPage(usize::MAX));
        let (state, _) = update(state, Action::NextPage);

        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_compare_limit_sets_error_notice() {
        let mut state = SearchState::new();
        for name in ["A", "B", "C"] {
            state = update(state, Action::CompareAdd(college(name))).0;
        }
        assert!(state.notice.is_none());

        let (state, _) = update(state, Action::CompareAdd(college("D")));

        assert_eq!(state.compare.len(), 3);
        let notice = state.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "You can compare up to 3 colleges at a time");

        let (state, _) = update(state, Action::DismissNotice);
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_fetch_aborted_marks_failure() {
        let (state, _) = edit(SearchState::new(), SearchField::Name, "Har");
        let (state, id) = settle(state);

        let (state, _) = update(state, Action::FetchAborted { request_id: id });

        assert_eq!(state.status, Status::Failed);
        assert!(!state.loading);
        assert_eq!(state.notice.unwrap().kind, NoticeKind::Error);
    }
}
