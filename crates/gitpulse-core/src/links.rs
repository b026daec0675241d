use crate::describe::EventKind;
use crate::event::Event;

/// Deep link into the hosting UI for an event, when one can be derived.
///
/// All links have the shape `{base}/{project_path}/-/{segment}/{id-or-ref}`.
/// Events with no addressable target (plain comments on other note types,
/// membership changes, ...) yield `None`.
pub fn event_url(event: &Event, base_url: &str, project_path: &str) -> Option<String> {
    let base = base_url.trim_end_matches('/');
    match EventKind::of(event) {
        EventKind::Push(push) => {
            if let Some(commit) = push.commit_to.as_deref() {
                Some(format!("{base}/{project_path}/-/commit/{commit}"))
            } else {
                push.ref_name
                    .as_deref()
                    .map(|ref_name| format!("{base}/{project_path}/-/tree/{ref_name}"))
            }
        }
        EventKind::MergeRequest => event
            .target_iid
            .map(|iid| format!("{base}/{project_path}/-/merge_requests/{iid}")),
        EventKind::Issue => event
            .target_iid
            .map(|iid| format!("{base}/{project_path}/-/issues/{iid}")),
        EventKind::Comment | EventKind::Generic => None,
    }
}
