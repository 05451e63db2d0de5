//! ASCII tree rendering for a project's packages and versions.

/// Marks the newest version of a package: the head of its history.
const LATEST: char = '●';
const EARLIER: char = '○';

/// A package and its ordered version ids.
#[derive(Debug, Clone)]
pub struct PackageNode {
    pub id: String,
    pub versions: Vec<String>,
}

/// Render a project tree.
///
/// Example output:
/// ```text
/// demo
/// ├── core
/// │   ├── ○ 01_initial
/// │   └── ● 02_menus
/// └── web
///     └── ● 01_initial
/// ```
pub fn render_tree(project_id: &str, packages: &[PackageNode]) -> String {
    let mut output = String::new();
    output.push_str(project_id);
    output.push('\n');

    for (i, package) in packages.iter().enumerate() {
        let is_last = i == packages.len() - 1;
        render_package(&mut output, package, is_last);
    }
    output
}

fn render_package(output: &mut String, package: &PackageNode, is_last: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    output.push_str(branch);
    output.push_str(&package.id);
    output.push('\n');

    let prefix = if is_last { "    " } else { "│   " };
    for (i, version) in package.versions.iter().enumerate() {
        let version_is_last = i == package.versions.len() - 1;
        let branch = if version_is_last { "└── " } else { "├── " };
        let symbol = if version_is_last { LATEST } else { EARLIER };

        output.push_str(prefix);
        output.push_str(branch);
        output.push(symbol);
        output.push(' ');
        output.push_str(version);
        output.push('\n');
    }
}
