use super::{fail, load_project, ProjectArgs};

pub fn cmd_list(args: ProjectArgs) {
    let (_, config) = load_project(&args);
    let packages = match config.package_set() {
        Ok(p) => p,
        Err(e) => fail(e),
    };

    if packages.is_empty() {
        println!("No packages declared.");
        return;
    }
    println!("Packages ({}):", packages.len());
    for package in packages.packages() {
        println!(
            "  {} -> {} ({})",
            package.gradle_name,
            package.target_name,
            package.source.name()
        );
    }

    let aliases = config.translator.aliases();
    let ignore = config.translator.ignore();
    if !aliases.is_empty() || !ignore.is_empty() {
        println!(
            "\nTranslation: {} aliases, {} ignored",
            aliases.len(),
            ignore.len()
        );
    }
}
