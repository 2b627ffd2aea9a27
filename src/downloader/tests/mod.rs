use super::test_helpers::*;
use super::*;
use crate::error::{DownloadError, ValidationError};
use crate::types::{CheckFileRequest, CreateFolderRequest, DownloadProgress, DownloadRequest};

mod folders;

#[test]
fn new_rejects_invalid_config() {
    let mut config = Config::default();
    config.models.supported_extensions.clear();

    let result = ModelDownloader::new(config, Arc::new(crate::events::EventBus::new()));
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn get_config_shares_the_instance() {
    let t = create_test_downloader();
    let config = t.downloader.get_config();
    assert_eq!(config.models_dir(), &t.models_dir());
    assert!(Arc::ptr_eq(&config, &t.downloader.clone().get_config()));
}
