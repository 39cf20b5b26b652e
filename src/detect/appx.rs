//! App-package (.appx/.msix) manifest reading.
//!
//! App packages are ZIP archives carrying an XML manifest. Bundles declare
//! one `<Package>` element per contained architecture in
//! `AppxBundleManifest.xml`; single packages declare theirs on the
//! `<Identity>` element of `AppxManifest.xml`. Manifest entries are read
//! straight from the archive index, never extracted to disk.
//!
//! Manifest XML carries different default namespaces across package-tooling
//! versions, so all element matching here is by local name only.

use crate::detect::Arch;
use crate::error::DetectError;
use roxmltree::{Document, Node};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

/// Manifest entry names, matched as case-insensitive suffixes anywhere in
/// the archive's internal path.
const BUNDLE_MANIFEST: &str = "appxbundlemanifest.xml";
const PACKAGE_MANIFEST: &str = "appxmanifest.xml";

/// Upper bound on a manifest entry read. Real manifests are a few KiB; the
/// cap keeps a malformed archive from ballooning memory.
const MAX_MANIFEST_BYTES: u64 = 4 * 1024 * 1024;

/// Detect the architectures declared by an app package or bundle.
///
/// Returns the distinct non-unknown tokens in first-seen manifest order; a
/// package that declares no recognizable architecture yields
/// `[Arch::Unknown]`. The bundle manifest always wins over a single-package
/// manifest present in the same archive.
pub fn detect(path: &Path) -> Result<Vec<Arch>, DetectError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    if let Some(entry) = find_entry(&archive, BUNDLE_MANIFEST) {
        let xml = read_entry(&mut archive, &entry)?;
        return bundle_architectures(&xml);
    }

    match find_entry(&archive, PACKAGE_MANIFEST) {
        Some(entry) => {
            let xml = read_entry(&mut archive, &entry)?;
            Ok(vec![package_architecture(&xml)?])
        }
        None => {
            log::debug!("{}: no manifest entry found", path.display());
            Ok(vec![Arch::Unknown])
        }
    }
}

/// Find the first archive entry whose name ends with `suffix`,
/// case-insensitive and path-separator agnostic.
fn find_entry(archive: &ZipArchive<File>, suffix: &str) -> Option<String> {
    archive
        .file_names()
        .find(|name| {
            name.to_ascii_lowercase().replace('\\', "/").ends_with(suffix)
        })
        .map(str::to_owned)
}

/// Read a manifest entry into a string, bounded by [`MAX_MANIFEST_BYTES`].
fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> Result<String, DetectError> {
    let entry = archive.by_name(name)?;
    let mut xml = String::new();
    entry.take(MAX_MANIFEST_BYTES).read_to_string(&mut xml)?;
    Ok(xml)
}

/// Extract the architecture set from a bundle manifest.
///
/// Every `<Package>` under the `<Packages>` container contributes its
/// `ProcessorArchitecture` (or `Architecture`) attribute; the first
/// attribute present wins. A package with no architecture attribute is
/// omitted from the set rather than defaulted.
fn bundle_architectures(xml: &str) -> Result<Vec<Arch>, DetectError> {
    let doc = Document::parse(xml)?;

    let mut archs = Vec::new();
    for packages in descendants_by_local_name(&doc, "Packages") {
        for package in children_by_local_name(packages, "Package") {
            let raw = package
                .attribute("ProcessorArchitecture")
                .or_else(|| package.attribute("Architecture"));
            if let Some(raw) = raw {
                let arch = Arch::normalize(raw);
                if arch != Arch::Unknown && !archs.contains(&arch) {
                    archs.push(arch);
                }
            }
        }
    }

    if archs.is_empty() {
        archs.push(Arch::Unknown);
    }
    Ok(archs)
}

/// Extract the architecture from a single-package manifest.
///
/// Looks for `Package/Identity` first, falling back to any `Identity`
/// element in the document. A missing or empty `ProcessorArchitecture`
/// attribute means architecture-neutral by manifest convention, not
/// unknown.
fn package_architecture(xml: &str) -> Result<Arch, DetectError> {
    let doc = Document::parse(xml)?;

    let identity = children_by_local_name(doc.root_element(), "Identity")
        .next()
        .or_else(|| descendants_by_local_name(&doc, "Identity").next());

    let raw = identity
        .and_then(|node| node.attribute("ProcessorArchitecture"))
        .filter(|value| !value.is_empty())
        .unwrap_or("neutral");

    Ok(Arch::normalize(raw))
}

/// Child elements matched by local name, ignoring namespace prefixes/URIs.
fn children_by_local_name<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// All elements in document order matched by local name.
fn descendants_by_local_name<'a, 'input>(
    doc: &'a Document<'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.root()
        .descendants()
        .filter(move |node| node.is_element() && node.tag_name().name() == name)
}
