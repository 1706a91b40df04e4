use super::{ApiError, ListArticlesQuery, ListKeywordsQuery};
use crate::constants::{articles, keywords};
use crate::db::{ArticleListParams, ArticleSortField};
use crate::domain::SortOrder;
use crate::services::KeywordPage;

fn bounded_limit(limit: Option<i64>, default: u64, max: u64) -> Result<u64, ApiError> {
    match limit {
        None => Ok(default),
        Some(n) => u64::try_from(n)
            .ok()
            .filter(|n| (1..=max).contains(n))
            .ok_or_else(|| {
                ApiError::invalid_query(format!(
                    "Invalid limit: {n}. Limit must be between 1 and {max}"
                ))
            }),
    }
}

pub fn validate_keyword_page(query: ListKeywordsQuery) -> Result<KeywordPage, ApiError> {
    let page = match query.page {
        None => 1,
        Some(p) => u64::try_from(p).ok().filter(|p| *p >= 1).ok_or_else(|| {
            ApiError::invalid_query(format!("Invalid page: {p}. Page must be at least 1"))
        })?,
    };
    let limit = bounded_limit(
        query.limit,
        keywords::DEFAULT_PAGE_SIZE,
        keywords::MAX_PAGE_SIZE,
    )?;
    // SQLite offsets are signed 64-bit.
    let max_offset = u64::try_from(i64::MAX).unwrap_or(u64::MAX);
    if (page - 1)
        .checked_mul(limit)
        .is_none_or(|offset| offset > max_offset)
    {
        return Err(ApiError::invalid_query(format!(
            "Invalid page: {page}. Page is out of range"
        )));
    }
    let search = query
        .query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    Ok(KeywordPage {
        query: search,
        page,
        limit,
    })
}

pub fn validate_bulk_phrases(phrases: &[String]) -> Result<(), ApiError> {
    if phrases.is_empty() || phrases.len() > keywords::MAX_BULK_PHRASES {
        return Err(ApiError::invalid_body(format!(
            "Between 1 and {} phrases are required",
            keywords::MAX_BULK_PHRASES
        )));
    }
    Ok(())
}

fn parse_sort_field(value: &str) -> Result<ArticleSortField, ApiError> {
    match value {
        "created_at" | "createdAt" => Ok(ArticleSortField::CreatedAt),
        "updated_at" | "updatedAt" => Ok(ArticleSortField::UpdatedAt),
        "title" => Ok(ArticleSortField::Title),
        other => Err(ApiError::invalid_query(format!(
            "Invalid sortBy: '{other}'. Use created_at, updated_at or title"
        ))),
    }
}

fn parse_sort_order(value: &str) -> Result<SortOrder, ApiError> {
    match value {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        other => Err(ApiError::invalid_query(format!(
            "Invalid sortOrder: '{other}'. Use asc or desc"
        ))),
    }
}

pub fn validate_article_list(query: ListArticlesQuery) -> Result<ArticleListParams, ApiError> {
    let limit = bounded_limit(
        query.limit,
        articles::DEFAULT_PAGE_SIZE,
        articles::MAX_PAGE_SIZE,
    )?;
    let offset = match query.offset {
        None => 0,
        Some(o) => u64::try_from(o).map_err(|_| {
            ApiError::invalid_query(format!("Invalid offset: {o}. Offset must not be negative"))
        })?,
    };
    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(s) => Some(s.parse().map_err(|_| {
            ApiError::invalid_query(format!(
                "Invalid status: '{s}'. Use all, draft, published or archived"
            ))
        })?),
    };

    Ok(ArticleListParams {
        status,
        sort_by: query
            .sort_by
            .as_deref()
            .map(parse_sort_field)
            .transpose()?
            .unwrap_or_default(),
        sort_order: query
            .sort_order
            .as_deref()
            .map(parse_sort_order)
            .transpose()?
            .unwrap_or_default(),
        offset,
        limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArticleStatus;

    #[test]
    fn test_keyword_page_defaults() {
        let page = validate_keyword_page(ListKeywordsQuery::default()).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 20);
        assert!(page.query.is_none());
    }

    #[test]
    fn test_keyword_page_bounds() {
        let over = ListKeywordsQuery {
            limit: Some(101),
            ..Default::default()
        };
        let err = validate_keyword_page(over).unwrap_err();
        assert_eq!(err.code(), "INVALID_QUERY_PARAMS");

        let zero_page = ListKeywordsQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(validate_keyword_page(zero_page).is_err());

        let max = ListKeywordsQuery {
            limit: Some(100),
            query: Some("   ".to_string()),
            ..Default::default()
        };
        let page = validate_keyword_page(max).unwrap();
        assert_eq!(page.limit, 100);
        assert!(page.query.is_none());
    }

    #[test]
    fn test_keyword_page_offset_must_fit() {
        let huge = ListKeywordsQuery {
            page: Some(i64::MAX),
            ..Default::default()
        };
        let err = validate_keyword_page(huge).unwrap_err();
        assert_eq!(err.code(), "INVALID_QUERY_PARAMS");

        let far = ListKeywordsQuery {
            page: Some(1_000_000),
            limit: Some(100),
            ..Default::default()
        };
        assert!(validate_keyword_page(far).is_ok());
    }

    #[test]
    fn test_bulk_phrase_count() {
        assert!(validate_bulk_phrases(&[]).is_err());
        assert!(validate_bulk_phrases(&vec!["a".to_string(); 50]).is_ok());
        assert!(validate_bulk_phrases(&vec!["a".to_string(); 51]).is_err());
    }

    #[test]
    fn test_article_list_defaults() {
        let params = validate_article_list(ListArticlesQuery::default()).unwrap();
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
        assert_eq!(params.status, None);
        assert_eq!(params.sort_by, ArticleSortField::CreatedAt);
        assert_eq!(params.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_article_list_parsing() {
        let query = ListArticlesQuery {
            limit: Some(5),
            offset: Some(10),
            status: Some("published".to_string()),
            sort_by: Some("updatedAt".to_string()),
            sort_order: Some("asc".to_string()),
        };
        let params = validate_article_list(query).unwrap();
        assert_eq!(params.status, Some(ArticleStatus::Published));
        assert_eq!(params.sort_by, ArticleSortField::UpdatedAt);
        assert_eq!(params.sort_order, SortOrder::Asc);
        assert_eq!(params.offset, 10);
    }

    #[test]
    fn test_article_list_rejects_bad_values() {
        for query in [
            ListArticlesQuery {
                limit: Some(0),
                ..Default::default()
            },
            ListArticlesQuery {
                offset: Some(-1),
                ..Default::default()
            },
            ListArticlesQuery {
                status: Some("deleted".to_string()),
                ..Default::default()
            },
            ListArticlesQuery {
                sort_by: Some("views".to_string()),
                ..Default::default()
            },
        ] {
            assert!(validate_article_list(query).is_err());
        }
    }
}
