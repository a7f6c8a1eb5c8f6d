//! Large title RTL demo.
//!
//! An RTL header titled "RTL Large Title Test" over Arabic, Hebrew and
//! English content, scrolled until the large title has collapsed into the
//! bar. Each frame is painted to the terminal.
//!
//! ```text
//! RUST_LOG=spark_header=debug cargo run --example large_title_rtl
//! ```

use spark_header::{Direction, HeaderError, HeaderOptions, ScrollSource, TerminalPreview, mount};
use tracing_subscriber::EnvFilter;

const NAVIGATOR_OPTIONS: &str = r##"{
    "headerLargeTitle": true,
    "direction": "rtl",
    "headerLargeTitleStyle": { "fontSize": 34, "fontWeight": "bold", "color": "#007AFF" },
    "headerStyle": { "backgroundColor": "#f8f9fa" },
    "headerTintColor": "#007AFF"
}"##;

const SCREEN_OPTIONS: &str = r#"{
    "title": "RTL Large Title Test",
    "headerLargeTitle": true,
    "direction": "rtl"
}"#;

const ARABIC: &str =
    "هذا نص تجريبي باللغة العربية لاختبار وظيفة العنوان الكبير مع اتجاه النص من اليمين إلى اليسار";
const HEBREW: &str =
    "זהו טקסט בדיקה בעברית לבדיקת פונקציונליות הכותרת הגדולה עם כיוון טקסט מימין לשמאל";

const SCREEN_WIDTH: f32 = 390.0;

fn main() -> Result<(), HeaderError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let navigator = HeaderOptions::from_json(NAVIGATOR_OPTIONS)?;
    let screen = HeaderOptions::from_json(SCREEN_OPTIONS)?;
    let config = screen
        .inherit(&navigator)
        .into_config(SCREEN_WIDTH, Direction::from_locale("ar"))?;

    let source = ScrollSource::new();
    let handle = mount(config, &source, TerminalPreview::stdout())?;

    println!("Large Title RTL Test");
    println!(
        "This screen tests headerLargeTitle functionality with RTL (Right-to-Left) direction."
    );
    println!("{ARABIC}");
    println!("{HEBREW}");
    for i in 1..=20 {
        println!("Item {i} - Scroll to see large title collapse");
    }
    println!();

    for offset in (0..=60).step_by(10) {
        source.emit(offset as f32);
    }

    let frame = handle.frame();
    println!(
        "final phase {:?}, compact title anchor {:?}",
        frame.visual.phase, frame.visual.compact_title_anchor
    );

    handle.unmount();
    Ok(())
}
