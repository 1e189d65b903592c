//! Shared helpers for catalog rules.

use crate::core::{
    MessageContext, MessageLocation,
    catalog::{Catalog, Context, Message},
};

/// Build the report position of a message inside its catalog.
pub fn message_context(catalog: &Catalog, context: &Context, message: &Message) -> MessageContext {
    MessageContext::new(
        MessageLocation::new(&catalog.file_path, message.line),
        context.name.clone(),
        message.source.clone(),
    )
}

/// Sort issues by file path, then line, then context name.
pub fn sort_by_context<T>(issues: &mut [T], get: impl Fn(&T) -> &MessageContext) {
    issues.sort_by(|a, b| {
        let (a, b) = (get(a), get(b));
        a.location
            .cmp(&b.location)
            .then_with(|| a.context.cmp(&b.context))
            .then_with(|| a.source.cmp(&b.source))
    });
}
