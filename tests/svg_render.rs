//! Integration tests for the SVG output.
//!
//! The fixture profile has 11 lines and the fixture scene types a 42
//! character command, so the reveal runs 4.7s..8.0s and one loop lasts 10.8s.

use std::path::Path;

use pretty_assertions::assert_eq;
use terminal_animator::renderer::EmbeddedFont;
use terminal_animator::{render_svg, Profile, RenderConfig, SceneConfig, SvgConfig, Theme};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn load() -> (Profile, RenderConfig) {
    let profile = Profile::from_file(&fixture("profile.yaml")).unwrap();
    let scene = SceneConfig::from_file(&fixture("scene.toml")).unwrap();
    (profile, RenderConfig::new().with_scene(scene))
}

/// Pull every `begin="..."` value out of the document, in order
fn begin_times(svg: &str) -> Vec<f64> {
    svg.match_indices(r#"begin=""#)
        .map(|(i, m)| {
            let rest = &svg[i + m.len()..];
            let end = rest.find("s\"").unwrap();
            rest[..end].parse().unwrap()
        })
        .collect()
}

#[test]
fn test_fixture_parses() {
    let (profile, _) = load();
    assert_eq!(profile.name, "profile.yaml");
    assert_eq!(profile.len(), 11);
    assert_eq!(profile.lines[3].indent, 2);
    assert_eq!(profile.lines[7].content, "- kubernetes");
}

#[test]
fn test_document_size() {
    let (profile, config) = load();
    let svg = render_svg(&profile, &config);
    assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(svg.contains(r#"viewBox="0 0 900 400" width="900" height="400""#));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn test_title_and_command() {
    let (profile, config) = load();
    let svg = render_svg(&profile, &config);
    assert!(svg.contains(">vishal@devops-engineer ~ % bash</text>"));
    assert!(svg.contains(
        r#"<set attributeName="opacity" to="1" begin="4.2s"/>kubectl get engineer vishal-rathod -o yaml</tspan>"#
    ));
}

#[test]
fn test_profile_lines_positioned_and_timed() {
    let (profile, config) = load();
    let svg = render_svg(&profile, &config);

    assert!(svg.contains(
        r#"<text x="20" y="100" class="text" opacity="0" xml:space="preserve"><set attributeName="opacity" to="1" begin="4.7s"/><tspan class="key">apiVersion:</tspan><tspan class="val"> v1</tspan></text>"#
    ));
    assert!(svg.contains(
        r#"<text x="34" y="160" class="text" opacity="0" xml:space="preserve"><set attributeName="opacity" to="1" begin="5.6s"/><tspan class="key">name:</tspan>"#
    ));
    assert!(svg.contains(
        r#"<text x="48" y="240" class="text" opacity="0" xml:space="preserve"><set attributeName="opacity" to="1" begin="6.8s"/><tspan class="val">- kubernetes</tspan></text>"#
    ));
    // Keys with no value get no value tspan
    assert!(svg.contains(r#"<tspan class="key">metadata:</tspan></text>"#));
    // The value keeps everything after the first colon
    assert!(svg.contains(r#"<tspan class="val"> https://example.com/vishal</tspan>"#));
}

#[test]
fn test_special_characters_escaped() {
    let (profile, config) = load();
    let svg = render_svg(&profile, &config);
    assert!(svg.contains("- &quot;ci/cd &amp; &lt;gitops&gt;&quot;"));
    assert!(!svg.contains("<gitops>"));
}

#[test]
fn test_reveal_times_increase() {
    let (profile, config) = load();
    let svg = render_svg(&profile, &config);
    let line_starts: Vec<f64> = svg
        .split(r#"xml:space="preserve"><set attributeName="opacity" to="1" begin=""#)
        .skip(1)
        .map(|rest| rest[..rest.find('s').unwrap()].parse().unwrap())
        .collect();
    assert_eq!(line_starts.len(), 11);
    for pair in line_starts.windows(2) {
        assert!((pair[1] - pair[0] - 0.3).abs() < 1e-6);
    }
    assert!(begin_times(&svg).iter().all(|t| *t <= 8.0 + 1e-6));
}

#[test]
fn test_cursor_follows_last_line() {
    let (profile, config) = load();
    let svg = render_svg(&profile, &config);
    assert!(svg.contains(
        r#"<text x="20" y="340" class="text" opacity="0"><set attributeName="opacity" to="1" begin="8s"/><tspan class="prompt">➜ </tspan><tspan class="prompt cursor">█</tspan></text>"#
    ));
    assert!(svg.contains(".cursor { animation: blink 0.8s infinite; }"));
}

#[test]
fn test_loop_script_interval() {
    let (profile, config) = load();
    let svg = render_svg(&profile, &config);
    assert_eq!(svg.matches("svg.setCurrentTime(0);").count(), 2);
    assert_eq!(svg.matches("}, 10800);").count(), 2);
}

#[test]
fn test_without_loop_script() {
    let (profile, config) = load();
    let config = config.with_svg(SvgConfig::new().with_loop_script(false));
    let svg = render_svg(&profile, &config);
    assert!(!svg.contains("<script"));
}

#[test]
fn test_clear_on_loop() {
    let (profile, mut config) = load();
    config.scene.script.clear_on_loop = true;
    let svg = render_svg(&profile, &config);

    // Cursor row hides when blinking stops, then "clear" is typed in its place
    assert!(svg.contains(r#"<set attributeName="opacity" to="0" begin="9s"/>"#));
    assert!(svg.contains(
        r#"<tspan class="prompt" opacity="0"><set attributeName="opacity" to="1" begin="9.5s"/>➜ </tspan>"#
    ));
    assert!(svg.contains(
        r#"<set attributeName="opacity" to="1" begin="10s"/>clear</tspan>"#
    ));
    assert!(svg.contains(
        r##"<set href="#terminal" attributeName="opacity" to="0" begin="10.3s"/>"##
    ));
}

#[test]
fn test_theme_file_recolors_keys() {
    let (profile, config) = load();
    let theme = Theme::from_file(&fixture("theme.toml")).unwrap();
    assert_eq!(theme.name.as_deref(), Some("mint"));
    let svg = render_svg(&profile, &config.with_theme(theme));
    assert!(svg.contains(".key { fill: #3DDC84; }"));
    assert!(svg.contains(r##"fill="#000000" rx="8""##));
    // Tokens missing from the file fall back to the default palette
    assert!(svg.contains(".val { fill: #B8C5D6; }"));
}

#[test]
fn test_compact_output() {
    let (profile, config) = load();
    let config = config.with_svg(SvgConfig::new().with_pretty_print(false).with_standalone(false));
    let svg = render_svg(&profile, &config);
    assert!(svg.starts_with("<svg"));
    let before_script = svg.split("<script").next().unwrap();
    assert!(!before_script.contains('\n'));
}

#[test]
fn test_web_font_import_by_default() {
    let (profile, config) = load();
    let svg = render_svg(&profile, &config);
    assert!(svg.contains(
        "@import url('https://fonts.googleapis.com/css2?family=JetBrains+Mono:wght@400;600&amp;display=swap');"
    ));
    assert!(svg.contains("* { font-family: 'JetBrains Mono', monospace; font-size: 14px; }"));
    assert!(!svg.contains("@font-face"));
}

#[test]
fn test_embedded_font_replaces_import() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Mono.woff2");
    std::fs::write(&path, b"wOF2abc").unwrap();

    let (profile, config) = load();
    let font = EmbeddedFont::from_file(&path).unwrap();
    let config = config.with_svg(SvgConfig::new().with_embedded_font(font));
    let svg = render_svg(&profile, &config);

    assert!(svg.contains(
        "@font-face { font-family: 'JetBrains Mono'; src: url(data:font/woff2;base64,d09GMmFiYw==) format('woff2'); }"
    ));
    assert!(!svg.contains("@import"));
}
