//! Module discovery on a real filesystem

use std::fs;
use std::path::Path;

use arf::diagnostics::{Diagnostics, FrontendError};
use arf::parser::ParseMode;
use arf::{FrontendConfig, FsLoader, ModuleLoader, load_module};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

fn scratch() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.arf", ":arf\nmodule shapes\n---\ndata rr two:Int 2\n");
    write(dir.path(), "a.arf", ":arf\nauthor \"me\"\nmodule shapes\n---\ndata rr one:Int 1\n");
    write(dir.path(), "c.arf", ":arf\nmodule other\n---\ndata rr three:Int 3\n");
    write(dir.path(), "d.arf", "module shapes\n---\ndata rr four:Int 4\n");
    write(dir.path(), "e.arf", ":arf\n---\nmodule shapes\n");
    write(dir.path(), "f.txt", ":arf\nmodule shapes\n---\ndata rr six:Int 6\n");
    fs::create_dir(dir.path().join("g.arf")).unwrap();
    dir
}

#[test]
fn test_finds_only_files_declaring_the_module() {
    let dir = scratch();
    let loader = FsLoader::new(FrontendConfig::default());
    let sources = loader.find_sources(dir.path(), "shapes").unwrap();

    let names: Vec<_> = sources
        .iter()
        .map(|source| source.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.arf", "b.arf"]);
}

#[test]
fn test_load_merges_files_in_path_order() {
    let dir = scratch();
    let loader = FsLoader::new(FrontendConfig::default());
    let mut diagnostics = Diagnostics::new();
    let module = load_module(&loader, &dir.path().join("shapes"), ParseMode::Full, &mut diagnostics).unwrap();

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(module.name, "shapes");
    assert_eq!(module.author, "me");
    let names: Vec<_> = module.datas.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["one", "two"]);
    assert_eq!(module.path, dir.path().canonicalize().unwrap().join("shapes"));
}

#[test]
fn test_custom_extension() {
    let dir = scratch();
    let loader = FsLoader::new(FrontendConfig::new().with_extension("txt"));
    let mut diagnostics = Diagnostics::new();
    let module = load_module(&loader, &dir.path().join("shapes"), ParseMode::Full, &mut diagnostics).unwrap();
    assert_eq!(module.datas.keys().map(String::as_str).collect::<Vec<_>>(), vec!["six"]);
}

#[test]
fn test_equal_paths_normalize_to_one_module_path() {
    let dir = scratch();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let loader = FsLoader::new(FrontendConfig::default());
    let mut diagnostics = Diagnostics::new();

    let direct = load_module(&loader, &dir.path().join("shapes"), ParseMode::Skim, &mut diagnostics).unwrap();
    let roundabout = load_module(
        &loader,
        &dir.path().join("sub/../shapes"),
        ParseMode::Skim,
        &mut diagnostics,
    )
    .unwrap();
    assert_eq!(direct.path, roundabout.path);
}

#[test]
fn test_empty_module() {
    let dir = scratch();
    let loader = FsLoader::new(FrontendConfig::default());
    let mut diagnostics = Diagnostics::new();
    let err = load_module(&loader, &dir.path().join("missing"), ParseMode::Full, &mut diagnostics).unwrap_err();
    assert!(matches!(err, FrontendError::EmptyModule { ref module } if module == "missing"));
}

#[test]
fn test_unreadable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FsLoader::new(FrontendConfig::default());
    let mut diagnostics = Diagnostics::new();
    let err = load_module(
        &loader,
        &dir.path().join("absent/shapes"),
        ParseMode::Full,
        &mut diagnostics,
    )
    .unwrap_err();
    assert!(matches!(err, FrontendError::Io { .. }));
}

#[test]
fn test_invalid_module_name() {
    let dir = scratch();
    let loader = FsLoader::new(FrontendConfig::default());
    let mut diagnostics = Diagnostics::new();
    let err = load_module(&loader, &dir.path().join("my_shapes"), ParseMode::Full, &mut diagnostics).unwrap_err();
    assert_eq!(err.to_string(), "\"my_shapes\" is not a valid module name");
}
