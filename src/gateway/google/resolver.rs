use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use crate::books::domain::UNKNOWN;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::metadata::{MetadataResolver, Resolution};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: u64,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    publisher: Option<String>,
    published_date: Option<String>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Default, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

/// Resolves ISBNs against the Google Books volumes API.
#[derive(Debug, Clone)]
pub struct GoogleBooksResolver {
    client: Client,
    base_url: String,
}

impl GoogleBooksResolver {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MetadataResolver for GoogleBooksResolver {
    async fn resolve(&self, isbn: &str) -> LibraryResult<Resolution> {
        let response = self.client
            .get(format!("{}/volumes", self.base_url))
            .query(&[("q", format!("isbn:{}", isbn))])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LibraryError::runtime(
                format!("metadata lookup for {} failed with {}", isbn, status).as_str(),
                Some(status.as_u16().to_string())));
        }
        let volumes: VolumesResponse = response.json().await?;
        if volumes.total_items == 0 {
            return Ok(Resolution::NotFound);
        }
        match volumes.items.into_iter().next() {
            Some(volume) => Ok(Resolution::Found(to_book(isbn, volume.volume_info))),
            None => Ok(Resolution::NotFound),
        }
    }
}

fn to_book(isbn: &str, info: VolumeInfo) -> BookDto {
    let or_unknown = |v: Option<String>| v.filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN.to_string());
    BookDto {
        id: None,
        isbn: isbn.to_string(),
        title: info.title.unwrap_or_default(),
        author: or_unknown(info.authors.filter(|a| !a.is_empty()).map(|a| a.join(", "))),
        publisher: or_unknown(info.publisher),
        year: or_unknown(info.published_date),
        cover_url: info.image_links.and_then(|l| l.thumbnail).unwrap_or_default(),
        edited: false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::books::domain::UNKNOWN;
    use crate::gateway::factory::build_http_client;
    use crate::gateway::google::resolver::GoogleBooksResolver;
    use crate::gateway::metadata::{MetadataResolver, Resolution};

    async fn build_resolver(server: &MockServer) -> GoogleBooksResolver {
        let client = build_http_client(std::time::Duration::from_secs(2)).expect("should build client");
        GoogleBooksResolver::new(client, server.uri().as_str())
    }

    #[tokio::test]
    async fn test_should_resolve_volume() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .and(query_param("q", "isbn:9780140449136"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalItems": 1,
                "items": [{"volumeInfo": {
                    "title": "Crime and Punishment",
                    "authors": ["Fyodor Dostoyevsky", "David McDuff"],
                    "publisher": "Penguin",
                    "publishedDate": "2003",
                    "imageLinks": {"thumbnail": "http://books.google.com/cover.jpg"}
                }}]
            })))
            .mount(&server)
            .await;

        let res = build_resolver(&server).await.resolve("9780140449136").await.expect("should resolve");
        let Resolution::Found(book) = res else { panic!("expected a resolved book") };
        assert_eq!("9780140449136", book.isbn.as_str());
        assert_eq!("Crime and Punishment", book.title.as_str());
        assert_eq!("Fyodor Dostoyevsky, David McDuff", book.author.as_str());
        assert_eq!("Penguin", book.publisher.as_str());
        assert_eq!("2003", book.year.as_str());
        assert_eq!("http://books.google.com/cover.jpg", book.cover_url.as_str());
    }

    #[tokio::test]
    async fn test_should_default_missing_volume_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalItems": 1,
                "items": [{"volumeInfo": {"title": "Sparse"}}]
            })))
            .mount(&server)
            .await;

        let res = build_resolver(&server).await.resolve("123").await.expect("should resolve");
        let Resolution::Found(book) = res else { panic!("expected a resolved book") };
        assert_eq!(UNKNOWN, book.author.as_str());
        assert_eq!(UNKNOWN, book.publisher.as_str());
        assert_eq!(UNKNOWN, book.year.as_str());
        assert_eq!("", book.cover_url.as_str());
    }

    #[tokio::test]
    async fn test_should_report_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "books#volumes", "totalItems": 0})))
            .mount(&server)
            .await;

        let res = build_resolver(&server).await.resolve("000").await.expect("a miss is not an error");
        assert_eq!(Resolution::NotFound, res);
    }

    #[tokio::test]
    async fn test_should_fail_on_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(build_resolver(&server).await.resolve("000").await.is_err());
    }

    #[tokio::test]
    async fn test_should_time_out_slow_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(json!({"totalItems": 0}))
                .set_delay(std::time::Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = build_http_client(std::time::Duration::from_millis(200)).expect("should build client");
        let resolver = GoogleBooksResolver::new(client, server.uri().as_str());
        let err = resolver.resolve("000").await.expect_err("should time out");
        assert!(err.is_unavailable());
    }
}
