//! Snapshot tests for rendered modules and semantic tree summaries
//!
//! Review changes: `cargo insta review`

use std::path::{Path, PathBuf};

use arf::diagnostics::Diagnostics;
use arf::parser::ParseMode;
use arf::{FrontendConfig, FsLoader, ModuleCache, analyze, load_module, render_module};

fn fixture(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(path)
}

fn render_fixture(path: &str, mode: ParseMode) -> String {
    let loader = FsLoader::new(FrontendConfig::default());
    let mut diagnostics = Diagnostics::new();
    let module = load_module(&loader, &fixture(path), mode, &mut diagnostics).unwrap();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    render_module(&module)
}

#[test]
fn test_render_geometry_main() {
    insta::assert_snapshot!(render_fixture("geometry/main", ParseMode::Full), @r#"
    :arf
    module main
    author "arf contributors"
    license "GPL-3.0-or-later"
    require "shapes"
    ---
    type rw Canvas:Obj
            rw origin:shapes.Point
            rw layers:{Layer 4}
    type rw Layer:Obj
            rw canvas:{Canvas}
            rw title:String "background"
    data rr greeting:String "hello"
    data rn offsets:{I32 3} 1 -2 3
    func rw draw
            @ canvas:{Canvas}
            > scale:F64 1.5
            < drawn:Int
            ---
            [= drawn 0]
            [shapes.area [shapes.unit] area:F64]
                    [+= drawn 1]
    "#);
}

#[test]
fn test_render_skimmed_module() {
    insta::assert_snapshot!(render_fixture("geometry/shapes", ParseMode::Skim), @r"
    :arf
    module shapes
    ---
    type rw Point:Obj
    func rr area
    func rr unit
    ");
}

#[test]
fn test_semantic_tree_summary() {
    let loader = FsLoader::new(FrontendConfig::default());
    let mut cache = ModuleCache::new();
    let mut diagnostics = Diagnostics::new();
    let tree = analyze(&mut cache, &loader, &fixture("geometry/main"), &mut diagnostics).unwrap();

    insta::assert_snapshot!(tree.to_string(), @r"
    typedef shapes.Point rw
      inherits Obj
      member px rw F64
      member py rw F64
    typedef main.Layer rw
      inherits Obj
      member canvas rw {main.Canvas}
      member title rw String
    typedef main.Canvas rw
      inherits Obj
      member origin rw shapes.Point
      member layers rw {main.Layer 4}
    data main.greeting rr String
    data main.offsets rn {I32 3}
    func main.draw rw
      @ canvas {main.Canvas}
      > scale F64
      < drawn Int:mut
    ");
}
