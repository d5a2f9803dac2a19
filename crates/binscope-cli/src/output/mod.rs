//! Plain-text report formatting for discovered packages.
//!
//! Pure string templating over the normalized package shape. Mapping keys
//! are sorted before rendering so output is stable run to run.

use binscope_registry::NormalizedPackage;

/// One-line summary: name, version and description
pub fn basic(package: &NormalizedPackage) -> String {
    let mut line = format!("{} @ {}", package.name, package.version);
    if let Some(description) = &package.description {
        line.push_str(" - ");
        line.push_str(description);
    }
    line
}

/// Declared commands, comma separated
pub fn commands(package: &NormalizedPackage) -> String {
    let mut names: Vec<&str> = package
        .bin
        .iter()
        .flat_map(|bin| bin.keys())
        .map(String::as_str)
        .collect();
    names.sort_unstable();
    format!("Commands: {}", names.join(", "))
}

/// Related links, one per line
pub fn links(package: &NormalizedPackage) -> String {
    let mut lines = vec![format!("npm: {}", package.links.npm)];
    if let Some(repository) = &package.links.repository {
        lines.push(format!("repository: {}", repository));
    }
    if let Some(homepage) = &package.links.homepage {
        lines.push(format!("homepage: {}", homepage));
    }
    lines.join("\n")
}

/// Runtime dependencies with their ranges, one per line
pub fn dependencies(package: &NormalizedPackage) -> String {
    let Some(deps) = &package.dependencies else {
        return "No dependencies".to_string();
    };
    if deps.is_empty() {
        return "No dependencies".to_string();
    }

    let mut entries: Vec<(&String, &String)> = deps.iter().collect();
    entries.sort_unstable();
    entries
        .iter()
        .map(|(name, range)| format!("{} {}", name, range))
        .collect::<Vec<_>>()
        .join("\n")
}

/// All sections joined into one block
pub fn all(package: &NormalizedPackage) -> String {
    [
        basic(package),
        commands(package),
        links(package),
        dependencies(package),
    ]
    .join("\n")
}

/// Print the full report for a discovery run
pub fn print_report(scope: &str, packages: &[NormalizedPackage]) {
    println!(
        "Found {} executable package(s) in {}",
        packages.len(),
        scope
    );
    for package in packages {
        println!("{}", "-".repeat(50));
        println!("{}", all(package));
    }
}
