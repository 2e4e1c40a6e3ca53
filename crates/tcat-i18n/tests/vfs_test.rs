//! Loading catalogs from embedded and virtual filesystems

use include_dir::{include_dir, Dir};
use mockall::mock;
use std::io;
use tcat_common::test_utils::init_test_logging;
use tcat_i18n::{params, Bundle, CatalogError, MemoryFs, VfsEntry, VirtualFs};

static EMBEDDED: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/tests/fixtures/embedded");

mock! {
    pub Fs {}

    impl VirtualFs for Fs {
        fn read_dir(&self, path: &str) -> io::Result<Vec<VfsEntry>>;
        fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;
    }
}

fn bundle(locale: &str) -> Bundle {
    init_test_logging();
    Bundle::new(locale.parse().unwrap())
}

#[test]
fn test_embedded_locale_directory() {
    let bundle = bundle("zh-Hans");
    assert_eq!(bundle.load_fs(&EMBEDDED).unwrap(), 3);

    assert_eq!(bundle.keys(), vec!["errors.not_found", "menu.open", "menu.save"]);
    assert_eq!(bundle.resolve("menu.open", &[]).unwrap(), "打开");

    let params = params! { "path" => "/tmp/x" };
    assert_eq!(
        bundle.resolve("errors.not_found", &[Some(&params)]).unwrap(),
        "未找到 /tmp/x"
    );
}

#[test]
fn test_embedded_without_locale_directory_walks_root() {
    let bundle = bundle("fr");
    assert_eq!(bundle.load_fs(&EMBEDDED).unwrap(), 5);

    // zh-Hans/menu.yaml sorts after en-US.yaml and wins
    assert_eq!(bundle.resolve("menu.open", &[]).unwrap(), "打开");
    assert_eq!(bundle.len(), 3);
}

#[test]
fn test_memory_fs() {
    let fs = MemoryFs::new()
        .with_file("en-US/app.toml", "[app]\ntitle = \"tcat\"\n")
        .with_file("en-US/deep/more.yml", "- first\n- second\n")
        .with_file("en-US/skip.txt", "ignored");

    let bundle = bundle("en-US");
    assert_eq!(bundle.load_fs(&fs).unwrap(), 3);
    assert_eq!(bundle.resolve("app.title", &[]).unwrap(), "tcat");
    assert_eq!(bundle.resolve("[1]", &[]).unwrap(), "second");
}

#[test]
fn test_listing_failure_propagates() {
    let mut fs = MockFs::new();
    fs.expect_read_dir()
        .times(1)
        .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));
    fs.expect_read_file().never();

    let bundle = bundle("en-US");
    let err = bundle.load_fs(&fs).unwrap_err();
    match err.root() {
        CatalogError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_missing_locale_directory_falls_back_to_root() {
    let mut fs = MockFs::new();
    fs.expect_read_dir().returning(|path| match path {
        "" => Ok(vec![VfsEntry::file("strings.json")]),
        _ => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
    });
    fs.expect_read_file()
        .times(1)
        .returning(|_| Ok(br#"{"hello": "world"}"#.to_vec()));

    let bundle = bundle("de");
    assert_eq!(bundle.load_fs(&fs).unwrap(), 1);
    assert_eq!(bundle.resolve("hello", &[]).unwrap(), "world");
}

#[test]
fn test_failing_file_leaves_catalog_untouched() {
    let mut fs = MockFs::new();
    fs.expect_read_dir()
        .returning(|_| Ok(vec![VfsEntry::file("en-US/a.yaml"), VfsEntry::file("en-US/b.yaml")]));
    fs.expect_read_file().returning(|path| match path {
        "en-US/a.yaml" => Ok(b"a: fine\n".to_vec()),
        _ => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated")),
    });

    let bundle = bundle("en-US");
    let err = bundle.load_fs(&fs).unwrap_err();
    assert!(err.to_string().contains("en-US/b.yaml"));
    assert!(bundle.is_empty());
}
