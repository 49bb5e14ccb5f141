//! Public contact-form submission.

use tracing::info;

use crate::backend::{row_id, Backend, Table};
use crate::cache::QueryCache;
use crate::error::Result;
use crate::model::NewContactMessage;
use crate::queries::CONTACT_MESSAGES;

/// Store a visitor's message with status `new`. Returns the new row id
/// when the backend reports one.
pub async fn submit_message(
    backend: &dyn Backend,
    cache: &QueryCache,
    message: &NewContactMessage,
) -> Result<Option<String>> {
    message.validate()?;
    let inserted = backend
        .insert(Table::ContactMessages, vec![message.to_row()])
        .await?;
    cache.invalidate(CONTACT_MESSAGES);
    let id = inserted.first().and_then(row_id);
    info!("Contact message received ({})", id.as_deref().unwrap_or("no id"));
    Ok(id)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::Error;
    use crate::memory::MemoryBackend;

    #[tokio::test]
    async fn test_submit_stores_new_message() {
        let db = MemoryBackend::new();
        let cache = QueryCache::new(Duration::from_secs(60));
        let msg = NewContactMessage {
            name: "Huda".into(),
            email: "huda@example.com".into(),
            message: "We need a promo video".into(),
            ..Default::default()
        };
        let id = submit_message(&db, &cache, &msg).await.unwrap();
        assert!(id.is_some());
        let rows = db.rows(Table::ContactMessages);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["status"], "new");
    }

    #[tokio::test]
    async fn test_invalid_message_is_not_stored() {
        let db = MemoryBackend::new();
        let cache = QueryCache::new(Duration::from_secs(60));
        let err = submit_message(&db, &cache, &NewContactMessage::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(db.rows(Table::ContactMessages).is_empty());
    }
}
