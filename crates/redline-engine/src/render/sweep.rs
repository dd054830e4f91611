use crate::annotation::AnnotationKind;
use crate::policy::{can_contain, sort_openings};
use crate::redaction::{RedactionCursor, Warp};

use super::RenderOptions;
use super::event::{MarkupEvent, push_text};
use super::state::{Entry, RenderState};

/// Walks every position `0..=chars.len()` once, closing, reopening and
/// opening elements and emitting content.
///
/// `entries` must be sorted with `sort_annotations`, contain no empty spans
/// and end within `chars`.
pub(crate) fn sweep(
    entries: &[Entry<'_>],
    chars: &[char],
    options: &RenderOptions,
) -> Vec<MarkupEvent> {
    let mut state = RenderState::default();
    let mut next = 0;

    for pointer in 0..=chars.len() {
        close_ending(entries, &mut state, pointer);
        state.redactions.retain(|c| c.end() != pointer);
        let batch = collect_openings(entries, &mut state, &mut next, pointer);
        open_batch(entries, &mut state, batch, pointer, options);
        emit_content(&mut state, chars, pointer);
    }

    debug_assert!(
        state.is_settled() && next == entries.len(),
        "annotations left open after the sweep: {:?}",
        state.open_order
    );
    state.events
}

/// Closes every entry ending at `pointer`, together with whatever is nested
/// above it. Nested entries that continue are queued to reopen.
fn close_ending(entries: &[Entry<'_>], state: &mut RenderState, pointer: usize) {
    while let Some(&target) = state.end_order.first()
        && entries[target].end() <= pointer
    {
        match state.open_order.iter().rposition(|&i| i == target) {
            Some(depth) => close_down_to(entries, state, depth, pointer),
            None => state.remove_end_order(target),
        }
    }
}

/// Pops the nesting stack down to and including `depth`, emitting one close
/// per element in LIFO order.
fn close_down_to(entries: &[Entry<'_>], state: &mut RenderState, depth: usize, pointer: usize) {
    while state.open_order.len() > depth {
        let Some(index) = state.open_order.pop() else {
            break;
        };
        state.events.push(MarkupEvent::Close {
            tag: entries[index].annotation.tag().to_string(),
        });
        state.remove_end_order(index);
        if entries[index].end() > pointer {
            state.reopen.push(index);
        }
    }
}

/// Gathers the entries starting at `pointer` plus the reopen queue into one
/// batch in nesting order.
///
/// A starting entry that may not nest inside the open stack splits it at the
/// outermost offending ancestor; the closed ancestors reopen inside it.
fn collect_openings(
    entries: &[Entry<'_>],
    state: &mut RenderState,
    next: &mut usize,
    pointer: usize,
) -> Vec<usize> {
    let mut batch = vec![];
    while *next < entries.len() && entries[*next].start() == pointer {
        let index = *next;
        *next += 1;

        let child = &entries[index].annotation;
        if let Some(depth) = state
            .open_order
            .iter()
            .position(|&a| !can_contain(&entries[a].annotation, child))
        {
            log::debug!(
                "splitting {} open element(s) at {pointer} for <{}>",
                state.open_order.len() - depth,
                child.tag()
            );
            close_down_to(entries, state, depth, pointer);
        }
        batch.push(index);
    }

    // closed innermost first, reopened outermost first
    batch.extend(state.reopen.drain(..).rev());
    batch.sort_by(|&a, &b| sort_openings(&entries[a].annotation, &entries[b].annotation));
    batch
}

/// Opens every entry of `batch` in order.
///
/// While a redaction is open its substitute is the only content emitted, and
/// it trails the raw pointer. An element opened then starts where the
/// emitting cursor resumes. Elements nested in a redaction, and redactions
/// themselves, hold substitute text and take the emitting cursor's warp;
/// anything the redaction reopens inside holds raw text only and keeps a
/// warp of one.
fn open_batch(
    entries: &[Entry<'_>],
    state: &mut RenderState,
    batch: Vec<usize>,
    pointer: usize,
    options: &RenderOptions,
) {
    for index in batch {
        let entry = &entries[index];
        let is_redaction = match &entry.annotation.kind {
            AnnotationKind::Redaction(redaction) => {
                if state.cursor(index).is_none() {
                    state.redactions.push(RedactionCursor::new(
                        index,
                        entry.annotation.span(),
                        redaction,
                        options.filler,
                    ));
                }
                true
            }
            _ => false,
        };
        let (position, warp) = match state.redactions.first() {
            None => (pointer as f64, Warp::IDENTITY),
            Some(emitting) if is_redaction || state.inside_redaction() => {
                (emitting.resume_position(), emitting.warp())
            }
            Some(emitting) => (emitting.resume_position(), Warp::IDENTITY),
        };

        log::trace!("open <{}> at {position} (warp {warp})", entry.annotation.tag());
        state
            .events
            .push(MarkupEvent::Open(entry.opening(position, warp)));
        state.open_order.push(index);
        state.insert_end_order(entries, index);
    }
}

/// Emits the raw char at `pointer`, or, while any redaction is open, the
/// outermost redaction's share of its substitute buffer instead.
fn emit_content(state: &mut RenderState, chars: &[char], pointer: usize) {
    let Some(&c) = chars.get(pointer) else {
        return;
    };

    if state.redactions.is_empty() {
        let mut buf = [0; 4];
        push_text(&mut state.events, c.encode_utf8(&mut buf));
        return;
    }

    let mut shown = String::new();
    for (k, cursor) in state.redactions.iter_mut().enumerate() {
        let revealed = cursor.advance(pointer);
        if k == 0 {
            shown.extend(revealed);
        }
    }
    push_text(&mut state.events, &shown);
}
