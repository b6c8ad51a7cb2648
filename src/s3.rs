//! S3 object store backed by plain HTTPS requests with AWS Signature V4.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::S3Config;
use crate::store::{ObjectStore, StoreError};

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of the empty payload, used for GET requests.
const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Everything except unreserved characters and the path separator is
/// percent-encoded in object keys, per the SigV4 canonical URI rules.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

pub struct S3Store {
    config: S3Config,
    client: Client,
}

impl S3Store {
    pub fn new(config: S3Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Virtual-hosted URL against AWS, path-style when an endpoint override
    /// is configured.
    fn object_url(&self, bucket: &str, key: &str) -> Result<Url, StoreError> {
        let encoded_key = utf8_percent_encode(key, KEY_ENCODE_SET);
        let raw = match &self.config.endpoint {
            Some(endpoint) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, encoded_key)
            }
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                bucket, self.config.region, encoded_key
            ),
        };
        Url::parse(&raw).map_err(|e| StoreError::Other(format!("bad object url {raw}: {e}")))
    }

    /// Adds SigV4 headers when credentials are configured; anonymous
    /// requests go out unsigned.
    fn authorize(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &Url,
        payload_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<RequestBuilder, StoreError> {
        let (Some(key_id), Some(secret)) = (
            self.config.access_key_id.as_deref(),
            self.config.secret_access_key.as_deref(),
        ) else {
            return Ok(request);
        };

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(StoreError::Other(format!("no host in url {url}"))),
        };
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();

        let mut canonical_headers = format!(
            "host:{host}\nx-amz-content-sha256:{payload_hash}\nx-amz-date:{amz_date}\n"
        );
        let mut signed_headers = "host;x-amz-content-sha256;x-amz-date".to_string();
        if let Some(token) = &self.config.session_token {
            canonical_headers.push_str(&format!("x-amz-security-token:{token}\n"));
            signed_headers.push_str(";x-amz-security-token");
        }

        let canonical_request = format!(
            "{method}\n{path}\n\n{canonical_headers}\n{signed_headers}\n{payload_hash}",
            path = url.path(),
        );
        let scope = format!("{date}/{region}/s3/aws4_request", region = self.config.region);
        let string_to_sign = format!(
            "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{hash}",
            hash = hex::encode(Sha256::digest(canonical_request.as_bytes())),
        );

        let mut key = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes())?;
        key = hmac_sha256(&key, self.config.region.as_bytes())?;
        key = hmac_sha256(&key, b"s3")?;
        key = hmac_sha256(&key, b"aws4_request")?;
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={key_id}/{scope}, \
             SignedHeaders={signed_headers}, Signature={signature}"
        );

        let mut request = request
            .header("x-amz-date", amz_date)
            .header("x-amz-content-sha256", payload_hash)
            .header("authorization", authorization);
        if let Some(token) = &self.config.session_token {
            request = request.header("x-amz-security-token", token);
        }
        Ok(request)
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, StoreError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| StoreError::Other(format!("cannot compute signature: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let url = self.object_url(bucket, key)?;
        debug!(%bucket, %key, "GET object");
        let request = self.authorize(
            self.client.get(url.clone()),
            "GET",
            &url,
            EMPTY_PAYLOAD_SHA256,
            Utc::now(),
        )?;
        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.bytes().await?),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            StatusCode::FORBIDDEN => Err(StoreError::Forbidden {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            status => Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), StoreError> {
        let url = self.object_url(bucket, key)?;
        debug!(%bucket, %key, bytes = body.len(), "PUT object");
        let payload_hash = hex::encode(Sha256::digest(&body));
        let request = self.authorize(
            self.client.put(url.clone()).body(body),
            "PUT",
            &url,
            &payload_hash,
            Utc::now(),
        )?;
        let response = request.send().await?;
        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            StatusCode::FORBIDDEN => Err(StoreError::Forbidden {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            status => Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}
