use crate::registry::provider::RegistryError;
use crate::registry::types::Page;
use futures::stream::{self, StreamExt};
use std::future::Future;
use tracing::warn;

/// Walks a paginated listing into a flat item list, threading the cursor token
/// until the registry stops returning one. A page-level failure aborts the
/// walk and is returned to the caller.
pub async fn walk_pages<T, F, Fut>(mut list: F) -> Result<Vec<T>, RegistryError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, RegistryError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;

    loop {
        let page = list(cursor.take()).await?;
        items.extend(page.items);

        match page.next_token {
            Some(token) => cursor = Some(token),
            None => break,
        }
    }

    Ok(items)
}

/// Expands each listed reference with a per-item detail call. A failed lookup
/// is logged and the item is skipped; it never aborts the walk. `concurrency`
/// of one keeps the calls sequential, higher values fan out with a bounded
/// pool; result order is not preserved.
pub async fn describe_each<S, D, I, F, Fut>(sources: Vec<S>, id_of: I, describe: F, concurrency: usize) -> Vec<D>
where
    I: Fn(&S) -> String,
    F: Fn(S) -> Fut,
    Fut: Future<Output = Result<D, RegistryError>>,
{
    stream::iter(sources.into_iter().map(|source| {
        let id = id_of(&source);
        let detail = describe(source);
        async move { (id, detail.await) }
    }))
    .buffer_unordered(concurrency.max(1))
    .filter_map(|(id, result)| async move {
        match result {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!(item_id = id, "⚠️ Skipping '{}', detail lookup failed: {}", id, e);
                None
            }
        }
    })
    .collect()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn page<T>(items: Vec<T>, next_token: Option<&str>) -> Page<T> {
        Page {
            items,
            next_token: next_token.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn walk_pages_follows_the_cursor_until_exhausted() -> Result<(), RegistryError> {
        let pages = Mutex::new(VecDeque::from([
            page(vec!["a", "b"], Some("t-1")),
            page(vec!["c"], Some("t-2")),
            page(vec!["d"], None),
        ]));
        let cursors = Mutex::new(Vec::new());

        let items = walk_pages(|cursor| {
            cursors.lock().unwrap().push(cursor);
            let next = pages.lock().unwrap().pop_front().unwrap();
            async move { Ok(next) }
        })
        .await?;

        assert_eq!(items, vec!["a", "b", "c", "d"]);
        assert_eq!(
            *cursors.lock().unwrap(),
            vec![None, Some("t-1".to_string()), Some("t-2".to_string())]
        );

        Ok(())
    }

    #[tokio::test]
    async fn walk_pages_aborts_on_a_page_failure() {
        let pages = Mutex::new(VecDeque::from([
            Ok(page(vec!["a"], Some("t-1"))),
            Err(RegistryError::Provider {
                id: "t-1".to_string(),
                description: "throttled".to_string(),
            }),
        ]));

        let result: Result<Vec<&str>, _> = walk_pages(|_| {
            let next = pages.lock().unwrap().pop_front().unwrap();
            async move { next }
        })
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn describe_each_skips_only_the_failing_item() {
        let sources: Vec<String> = (1..=10).map(|i| format!("item-{}", i)).collect();

        let details = describe_each(
            sources,
            |s| s.clone(),
            |s| async move {
                if s == "item-5" {
                    Err(RegistryError::Provider {
                        id: s,
                        description: "internal failure".to_string(),
                    })
                } else {
                    Ok(s)
                }
            },
            1,
        )
        .await;

        assert_eq!(details.len(), 9);
        assert!(!details.contains(&"item-5".to_string()));
    }

    #[tokio::test]
    async fn describe_each_with_a_bounded_pool_yields_every_item() {
        let sources: Vec<String> = (1..=20).map(|i| format!("item-{}", i)).collect();
        let expected = sources.clone();

        let mut details = describe_each(sources, |s| s.clone(), |s| async move { Ok(s) }, 4).await;
        details.sort_by_key(|id: &String| id[5..].parse::<u32>().unwrap());

        assert_eq!(details, expected);
    }
}
