use super::*;
use std::fs;

fn folder(parent: Option<&str>, name: &str) -> CreateFolderRequest {
    CreateFolderRequest {
        parent_path: parent.map(str::to_string),
        folder_name: Some(name.to_string()),
    }
}

fn check(model: &str, save_path: Option<&str>, extension: &str) -> CheckFileRequest {
    CheckFileRequest {
        model_name: Some(model.to_string()),
        save_path: save_path.map(str::to_string),
        extension: Some(extension.to_string()),
    }
}

#[tokio::test]
async fn list_directories_puts_specials_first() {
    let t = create_test_downloader();
    for dir in ["checkpoints", "loras", "vae", "loras/sdxl"] {
        fs::create_dir_all(t.models_dir().join(dir)).unwrap();
    }

    let listing = t.downloader.list_directories().await.unwrap();
    let paths: Vec<&str> = listing.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(paths, vec!["", "loras", "checkpoints", "loras/sdxl", "vae"]);
    assert_eq!(listing[0].name, "models");
}

#[tokio::test]
async fn create_folder_returns_updated_listing() {
    let t = create_test_downloader();
    fs::create_dir_all(t.models_dir().join("loras")).unwrap();

    let listing = t
        .downloader
        .create_folder(folder(Some("loras"), "sdxl"))
        .await
        .unwrap();

    assert!(t.models_dir().join("loras/sdxl").is_dir());
    let entry = listing.iter().find(|d| d.path == "loras/sdxl").unwrap();
    assert_eq!(entry.name, "sdxl");
    assert!(!entry.special);
}

#[tokio::test]
async fn create_folder_defaults_to_models_root() {
    let t = create_test_downloader();

    t.downloader
        .create_folder(CreateFolderRequest {
            parent_path: None,
            folder_name: Some("upscale_models".into()),
        })
        .await
        .unwrap();

    assert!(t.models_dir().join("upscale_models").is_dir());
}

#[tokio::test]
async fn create_folder_sanitizes_name() {
    let t = create_test_downloader();

    let listing = t
        .downloader
        .create_folder(folder(None, "My Loras (v2)/.."))
        .await
        .unwrap();

    assert!(t.models_dir().join("My Loras v2").is_dir());
    assert!(listing.iter().any(|d| d.path == "My Loras v2"));
}

#[tokio::test]
async fn create_existing_folder_is_conflict_and_changes_nothing() {
    let t = create_test_downloader();
    fs::create_dir_all(t.models_dir().join("loras/sdxl")).unwrap();
    fs::write(t.models_dir().join("loras/sdxl/keep.pt"), b"x").unwrap();
    let before = snapshot(&t.models_dir());

    let err = t
        .downloader
        .create_folder(folder(Some("loras"), "sdxl"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::FolderExists { .. })
    ));
    assert_eq!(err.to_string(), "Folder already exists");
    assert_eq!(snapshot(&t.models_dir()), before);
}

#[tokio::test]
async fn create_folder_requires_a_usable_name() {
    let t = create_test_downloader();
    let before = snapshot(&t.models_dir());

    for name in [None, Some(""), Some("   "), Some("!!!")] {
        let err = t
            .downloader
            .create_folder(CreateFolderRequest {
                parent_path: None,
                folder_name: name.map(str::to_string),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Folder name is required", "name {name:?}");
    }
    assert_eq!(snapshot(&t.models_dir()), before);
}

#[tokio::test]
async fn create_folder_parent_must_stay_inside() {
    let t = create_test_downloader();

    let err = t
        .downloader
        .create_folder(folder(Some("../.."), "escape"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidPath(_))
    ));
    assert!(!t.temp_dir.path().join("escape").exists());
}

#[tokio::test]
async fn check_file_reports_missing_file() {
    let t = create_test_downloader();

    let result = t
        .downloader
        .check_file(check("my lora", Some("loras"), ".safetensors"))
        .await
        .unwrap();

    assert!(!result.exists);
    assert_eq!(result.file_path, "loras/mylora.safetensors");
}

#[tokio::test]
async fn check_file_finds_existing_file() {
    let t = create_test_downloader();
    fs::create_dir_all(t.models_dir().join("checkpoints")).unwrap();
    fs::write(t.models_dir().join("checkpoints/base.ckpt"), b"x").unwrap();

    let result = t
        .downloader
        .check_file(check("base", Some("checkpoints"), ".ckpt"))
        .await
        .unwrap();

    assert!(result.exists);
    assert_eq!(result.file_path, "checkpoints/base.ckpt");
}

#[tokio::test]
async fn check_file_keeps_name_extension_over_fallback() {
    let t = create_test_downloader();

    let result = t
        .downloader
        .check_file(check("tweak.pt", None, ".safetensors"))
        .await
        .unwrap();

    assert_eq!(result.file_path, "loras/tweak.pt");
}

#[tokio::test]
async fn check_file_rejects_unlisted_extensions() {
    let t = create_test_downloader();

    let err = t
        .downloader
        .check_file(check("model.gguf", None, ".safetensors"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidExtension { .. })
    ));

    let err = t
        .downloader
        .check_file(check("model", None, ".exe"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid extension: .exe. Supported extensions are: .safetensors, .pt, .ckpt, .bin"
    );
}

#[tokio::test]
async fn check_file_requires_name_and_extension() {
    let t = create_test_downloader();

    for req in [
        CheckFileRequest::default(),
        CheckFileRequest {
            model_name: Some("x".into()),
            ..Default::default()
        },
        CheckFileRequest {
            extension: Some(".pt".into()),
            ..Default::default()
        },
    ] {
        let err = t.downloader.check_file(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing model name or extension");
    }
}
