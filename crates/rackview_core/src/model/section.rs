//! Top-level areas of the console.

use std::fmt;

use super::AppPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Machines,
    Controllers,
    Devices,
    Kvm,
    Networks,
    Tags,
    Zones,
    Domains,
    Dashboard,
    Intro,
}

impl Section {
    /// Sections reachable from the navigation bar, in display order.
    pub const NAVIGABLE: [Section; 9] = [
        Section::Machines,
        Section::Controllers,
        Section::Devices,
        Section::Kvm,
        Section::Networks,
        Section::Tags,
        Section::Zones,
        Section::Domains,
        Section::Dashboard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Machines => "Machines",
            Section::Controllers => "Controllers",
            Section::Devices => "Devices",
            Section::Kvm => "KVM",
            Section::Networks => "Networks",
            Section::Tags => "Tags",
            Section::Zones => "Zones",
            Section::Domains => "Domains",
            Section::Dashboard => "Dashboard",
            Section::Intro => "Intro",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Machines => "machines",
            Section::Controllers => "controllers",
            Section::Devices => "devices",
            Section::Kvm => "kvm",
            Section::Networks => "networks",
            Section::Tags => "tags",
            Section::Zones => "zones",
            Section::Domains => "domains",
            Section::Dashboard => "dashboard",
            Section::Intro => "intro",
        }
    }

    pub fn index_path(&self) -> AppPath {
        AppPath::root().join(self.slug())
    }

    /// Section owning `path`, keyed on its first segment.
    pub fn from_path(path: &AppPath) -> Option<Self> {
        let first = path.first_segment()?;
        Self::NAVIGABLE
            .into_iter()
            .chain(std::iter::once(Section::Intro))
            .find(|section| section.slug() == first)
    }

    pub fn nav_index(&self) -> Option<usize> {
        Self::NAVIGABLE.iter().position(|section| section == self)
    }

    pub fn from_nav_index(index: usize) -> Option<Self> {
        Self::NAVIGABLE.get(index).copied()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
