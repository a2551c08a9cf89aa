use mvn2bp::{GraphWriter, HttpFetcher};

use super::{fail, load_project, ProjectArgs};

pub fn cmd_update(args: ProjectArgs) {
    let (root, config) = load_project(&args);
    let fetcher = match HttpFetcher::new() {
        Ok(f) => f,
        Err(e) => fail(e),
    };

    let summary = match GraphWriter::new(&config, &root, &fetcher).run() {
        Ok(s) => s,
        Err(e) => fail(e),
    };

    println!(
        "Vendored {} of {} packages",
        summary.vendored, summary.packages
    );
    for path in &summary.written {
        println!("  {}", path.display());
    }
}
