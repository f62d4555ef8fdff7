use crate::drive::config::Config;
use crate::drive::file::{FileEntry, FileListing};
use crate::error::{DriveError, DriveResult};
use crate::storage_api::{ApiFuture, StorageApi};

use bytes::Bytes;
use futures::future::FutureExt;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use serde::Deserialize;

pub const FILENAME_HEADER: &str = "x-filename";

/// Talks to the LAN Drive HTTP API under `{server}{api_prefix}`.
#[derive(Debug, Clone)]
pub struct DriveClient {
    client: Client,
    base: Url,
    delete_route: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl DriveClient {
    pub fn new(config: &Config) -> DriveResult<DriveClient> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let mut base = Url::parse(config.server.trim()).map_err(|e| {
            DriveError::Config(format!("invalid server url {:?}: {}", config.server, e))
        })?;
        base.path_segments_mut()
            .map_err(|_| DriveError::Config(format!("{} cannot be a base url", config.server)))?
            .pop_if_empty()
            .extend(config.api_prefix.split('/').filter(|s| !s.is_empty()));

        tracing::debug!("drive api base: {}", base);
        Ok(DriveClient {
            client,
            base,
            delete_route: config.delete_route.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> DriveResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DriveError::Config(format!("{} cannot be a base url", self.base)))?
            .extend(segments);
        Ok(url)
    }

    // filenames travel as a single path segment.
    fn file_endpoint(&self, action: &str, name: &str) -> DriveResult<Url> {
        if name.is_empty() || name == "." || name == ".." || name.contains('/') {
            return Err(DriveError::InvalidFilename(name.to_string()));
        }
        self.endpoint(&[action, name])
    }
}

async fn ensure_success(res: Response) -> DriveResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(b) => b.error,
        Err(_) => body.trim().to_string(),
    };
    Err(DriveError::Status { status, message })
}

impl StorageApi for DriveClient {
    fn list_files(&self) -> ApiFuture<'_, Vec<FileEntry>> {
        async move {
            let url = self.endpoint(&["files"])?;
            tracing::info!("GET {}", url);
            let res = ensure_success(self.client.get(url).send().await?).await?;
            let listing: FileListing = serde_json::from_slice(&res.bytes().await?)?;
            tracing::info!("loaded {} file entries", listing.files.len());
            Ok(listing.files)
        }
        .boxed()
    }

    fn download<'a>(&'a self, name: &'a str) -> ApiFuture<'a, Bytes> {
        async move {
            let url = self.file_endpoint("download", name)?;
            tracing::info!("GET {}", url);
            let res = ensure_success(self.client.get(url).send().await?).await?;
            let data = res.bytes().await?;
            tracing::info!("downloaded {} ({} bytes)", name, data.len());
            Ok(data)
        }
        .boxed()
    }

    fn delete<'a>(&'a self, name: &'a str) -> ApiFuture<'a, ()> {
        async move {
            let url = self.file_endpoint(&self.delete_route, name)?;
            tracing::info!("DELETE {}", url);
            ensure_success(self.client.delete(url).send().await?).await?;
            Ok(())
        }
        .boxed()
    }

    fn upload<'a>(&'a self, name: &'a str, data: Bytes) -> ApiFuture<'a, ()> {
        async move {
            let filename = HeaderValue::from_bytes(name.as_bytes())
                .map_err(|_| DriveError::InvalidFilename(name.to_string()))?;
            let url = self.endpoint(&["upload"])?;
            tracing::info!("POST {} ({}, {} bytes)", url, name, data.len());
            let req = self
                .client
                .post(url)
                .header(HeaderName::from_static(FILENAME_HEADER), filename)
                .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
                .body(data);
            ensure_success(req.send().await?).await?;
            Ok(())
        }
        .boxed()
    }

    fn file_info<'a>(&'a self, name: &'a str) -> ApiFuture<'a, FileEntry> {
        async move {
            let url = self.file_endpoint("info", name)?;
            tracing::info!("GET {}", url);
            let res = ensure_success(self.client.get(url).send().await?).await?;
            Ok(serde_json::from_slice(&res.bytes().await?)?)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &str, prefix: &str) -> DriveClient {
        let config = Config {
            server: server.to_string(),
            api_prefix: prefix.to_string(),
            ..Config::default()
        };
        DriveClient::new(&config).unwrap()
    }

    #[test]
    fn prefix_is_appended_to_server_path() {
        let c = client("http://192.168.1.180:8080/", "/api");
        assert_eq!(c.base_url().as_str(), "http://192.168.1.180:8080/api");
        let c = client("http://nas.local/drive", "api/");
        assert_eq!(
            c.endpoint(&["files"]).unwrap().as_str(),
            "http://nas.local/drive/api/files"
        );
    }

    #[test]
    fn filenames_are_percent_encoded() {
        let c = client("http://127.0.0.1:8080", "/api");
        let url = c.file_endpoint("download", "my report#1.pdf").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/api/download/my%20report%231.pdf"
        );
    }

    #[test]
    fn delete_route_is_configurable() {
        let config = Config {
            server: "http://127.0.0.1:8080".to_string(),
            delete_route: "files".to_string(),
            ..Config::default()
        };
        let c = DriveClient::new(&config).unwrap();
        assert_eq!(
            c.file_endpoint(&c.delete_route, "a.txt").unwrap().as_str(),
            "http://127.0.0.1:8080/api/files/a.txt"
        );
    }

    #[test]
    fn path_like_names_are_rejected() {
        let c = client("http://127.0.0.1:8080", "/api");
        for name in &["", ".", "..", "a/b"] {
            assert!(matches!(
                c.file_endpoint("delete", name),
                Err(DriveError::InvalidFilename(_))
            ));
        }
    }

    #[test]
    fn bad_server_url_is_a_config_error() {
        let config = Config {
            server: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(DriveClient::new(&config), Err(DriveError::Config(_))));
    }
}
