use std::path::{Path, PathBuf};
use std::sync::Arc;

use azure_identity::{DefaultAzureCredential, TokenCredentialOptions};
use azure_storage::StorageCredentials;
use azure_storage_blobs::prelude::{BlobServiceClient, ContainerClient};
use futures::StreamExt;
use tokio::runtime::Runtime;

use crate::config::StorageConfig;
use crate::errors::StorageError;
use crate::storage::{format_abfs_uri, parse_abfs_uri, BlobRef, BlobStorageClient};
use crate::GantryResult;

/// Blob client for one storage account and container. Owns a
/// current-thread runtime so synchronous dataset code can drive the SDK.
pub struct AdlsClient {
    account: String,
    container: String,
    runtime: Runtime,
    container_client: ContainerClient,
}

impl AdlsClient {
    pub fn new(storage: &StorageConfig) -> GantryResult<Self> {
        let credential = DefaultAzureCredential::create(TokenCredentialOptions::default())
            .map_err(|err| {
                Box::new(StorageError(format!("adls credential init failed: {err}")))
                    as Box<dyn std::error::Error + Send + Sync>
            })?;
        Self::build(
            storage,
            StorageCredentials::token_credential(Arc::new(credential)),
        )
    }

    /// Account-key auth, as handed to workers through the runner config.
    pub fn with_account_key(storage: &StorageConfig, account_key: &str) -> GantryResult<Self> {
        Self::build(
            storage,
            StorageCredentials::access_key(storage.account_name.clone(), account_key.to_string()),
        )
    }

    fn build(storage: &StorageConfig, credentials: StorageCredentials) -> GantryResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| {
                Box::new(StorageError(format!("adls runtime init failed: {err}")))
                    as Box<dyn std::error::Error + Send + Sync>
            })?;
        let service_client = BlobServiceClient::new(storage.account_name.clone(), credentials);
        let container_client = service_client.container_client(storage.container.clone());
        Ok(Self {
            account: storage.account_name.clone(),
            container: storage.container.clone(),
            runtime,
            container_client,
        })
    }

    fn blob_key(&self, uri: &str, op: &str) -> GantryResult<String> {
        let location = parse_abfs_uri(uri)?;
        if location.account != self.account || location.container != self.container {
            return Err(Box::new(StorageError(format!(
                "adls {op} account/container mismatch: {uri}"
            ))));
        }
        if location.path.is_empty() {
            return Err(Box::new(StorageError(format!(
                "adls {op} requires a blob path: {uri}"
            ))));
        }
        Ok(location.path)
    }
}

impl BlobStorageClient for AdlsClient {
    fn list(&self, prefix: &str) -> GantryResult<Vec<BlobRef>> {
        let prefix = prefix.trim_start_matches('/').to_string();
        let container = self.container.clone();
        let account = self.account.clone();
        let client = self.container_client.clone();
        self.runtime.block_on(async move {
            let mut refs = Vec::new();
            let mut stream = client.list_blobs().prefix(prefix).into_stream();
            while let Some(resp) = stream.next().await {
                let resp = resp.map_err(|err| {
                    Box::new(StorageError(format!("adls list failed: {err}")))
                        as Box<dyn std::error::Error + Send + Sync>
                })?;
                for blob in resp.blobs.blobs() {
                    let key = blob.name.clone();
                    refs.push(BlobRef {
                        uri: format_abfs_uri(&container, &account, &key),
                        key,
                        size: Some(blob.properties.content_length),
                    });
                }
            }
            refs.sort_by(|a, b| a.key.cmp(&b.key));
            Ok(refs)
        })
    }

    fn download(&self, uri: &str, dest_dir: &Path) -> GantryResult<PathBuf> {
        let key = self.blob_key(uri, "download")?;
        let dest = dest_dir.join(
            Path::new(&key)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("object"),
        );
        let dest_clone = dest.clone();
        let client = self.container_client.clone();
        self.runtime.block_on(async move {
            if let Some(parent) = dest_clone.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let blob = client.blob_client(key);
            let mut stream = blob.get().into_stream();
            let mut file = tokio::fs::File::create(&dest_clone).await?;
            while let Some(chunk) = stream.next().await {
                let resp = chunk.map_err(|err| {
                    Box::new(StorageError(format!("adls download failed: {err}")))
                        as Box<dyn std::error::Error + Send + Sync>
                })?;
                let bytes = resp.data.collect().await.map_err(|err| {
                    Box::new(StorageError(format!("adls download read failed: {err}")))
                        as Box<dyn std::error::Error + Send + Sync>
                })?;
                tokio::io::AsyncWriteExt::write_all(&mut file, &bytes).await?;
            }
            Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
        })?;
        Ok(dest)
    }

    fn upload(&self, local_path: &Path, uri: &str) -> GantryResult<()> {
        let key = self.blob_key(uri, "upload")?;
        let client = self.container_client.clone();
        let path = local_path.to_path_buf();
        self.runtime.block_on(async move {
            let data = tokio::fs::read(path).await?;
            let blob = client.blob_client(key);
            blob.put_block_blob(data)
                .content_type("application/octet-stream")
                .into_future()
                .await
                .map_err(|err| {
                    Box::new(StorageError(format!("adls upload failed: {err}")))
                        as Box<dyn std::error::Error + Send + Sync>
                })?;
            Ok(())
        })
    }

    fn exists(&self, uri: &str) -> GantryResult<bool> {
        let key = self.blob_key(uri, "exists")?;
        let refs = self.list(&key)?;
        Ok(refs.iter().any(|object| object.key == key))
    }
}
