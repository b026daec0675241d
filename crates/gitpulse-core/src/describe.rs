use crate::event::{Event, PushData};

/// Comment previews are cut off after this many characters.
const NOTE_PREVIEW_CHARS: usize = 100;

/// Classification of an event for description and link derivation.
///
/// Computed once per event; the branches below are ordered so that push
/// payloads win over target types, and target types win over the bare
/// "commented" action.
#[derive(Debug, Clone, Copy)]
pub enum EventKind<'a> {
    Push(&'a PushData),
    MergeRequest,
    Issue,
    Comment,
    Generic,
}

impl<'a> EventKind<'a> {
    pub fn of(event: &'a Event) -> Self {
        if event.action_name == "pushed" {
            if let Some(push) = &event.push_data {
                return EventKind::Push(push);
            }
        }
        match event.target_type() {
            Some("MergeRequest") => EventKind::MergeRequest,
            Some("Issue") => EventKind::Issue,
            _ if event.action_name == "commented" => EventKind::Comment,
            _ => EventKind::Generic,
        }
    }
}

/// Human-readable one-line description of an event.
pub fn describe(event: &Event) -> String {
    match EventKind::of(event) {
        EventKind::Push(push) => describe_push(push),
        EventKind::MergeRequest | EventKind::Issue => match event.title() {
            Some(title) => format!("{}: {title}", humanize(&event.action_name)),
            // Untitled MR/Issue events still get the comment rule before
            // the generic fallback.
            None => describe_comment_or_generic(event),
        },
        EventKind::Comment | EventKind::Generic => describe_comment_or_generic(event),
    }
}

fn describe_comment_or_generic(event: &Event) -> String {
    if event.action_name == "commented" {
        if let Some(body) = event.note.as_ref().and_then(|n| n.body.as_deref()) {
            return describe_comment(body);
        }
    }
    describe_generic(event)
}

fn describe_push(push: &PushData) -> String {
    let ref_name = push
        .ref_name
        .as_deref()
        .or(push.ref_type.as_deref())
        .unwrap_or("branch");
    let count = push.commit_count.unwrap_or(0);
    let plural = if count == 1 { "" } else { "s" };
    match push.commit_title.as_deref() {
        Some(title) => format!("Pushed {count} commit{plural} to {ref_name}: {title}"),
        None => format!("Pushed {count} commit{plural} to {ref_name}"),
    }
}

fn describe_comment(body: &str) -> String {
    let preview: String = body.chars().take(NOTE_PREVIEW_CHARS).collect();
    if body.chars().count() > NOTE_PREVIEW_CHARS {
        format!("Commented: {preview}...")
    } else {
        format!("Commented: {preview}")
    }
}

fn describe_generic(event: &Event) -> String {
    let action = humanize(&event.action_name);
    match event.target_type() {
        Some(target_type) => format!("{action} {target_type}"),
        None => action,
    }
}

fn humanize(action_name: &str) -> String {
    action_name.replace('_', " ")
}
