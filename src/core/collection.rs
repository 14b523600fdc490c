use serde::{Deserialize, Serialize};

use crate::core::variant::{SvType, VariantRecord};

/// Variants from one input, partitioned by kind and kept in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantCollection {
    translocations: Vec<VariantRecord>,
    duplications: Vec<VariantRecord>,
    inversions: Vec<VariantRecord>,
    deletions: Vec<VariantRecord>,
    insertions: Vec<VariantRecord>,
    copy_number_variations: Vec<VariantRecord>,
    unknown: Vec<VariantRecord>,

    /// Records with at least one breakpoint on an unresolvable chromosome
    unresolved_chromosomes: usize,
}

impl VariantCollection {
    #[must_use]
    pub fn translocations(&self) -> &[VariantRecord] {
        &self.translocations
    }

    #[must_use]
    pub fn duplications(&self) -> &[VariantRecord] {
        &self.duplications
    }

    #[must_use]
    pub fn inversions(&self) -> &[VariantRecord] {
        &self.inversions
    }

    #[must_use]
    pub fn deletions(&self) -> &[VariantRecord] {
        &self.deletions
    }

    #[must_use]
    pub fn insertions(&self) -> &[VariantRecord] {
        &self.insertions
    }

    #[must_use]
    pub fn copy_number_variations(&self) -> &[VariantRecord] {
        &self.copy_number_variations
    }

    #[must_use]
    pub fn unknown(&self) -> &[VariantRecord] {
        &self.unknown
    }

    /// Records of the given kind
    #[must_use]
    pub fn get(&self, kind: SvType) -> &[VariantRecord] {
        match kind {
            SvType::Bnd => &self.translocations,
            SvType::Dup => &self.duplications,
            SvType::Inv => &self.inversions,
            SvType::Del => &self.deletions,
            SvType::Ins => &self.insertions,
            SvType::Cnv => &self.copy_number_variations,
            SvType::Unk => &self.unknown,
        }
    }

    fn get_mut(&mut self, kind: SvType) -> &mut Vec<VariantRecord> {
        match kind {
            SvType::Bnd => &mut self.translocations,
            SvType::Dup => &mut self.duplications,
            SvType::Inv => &mut self.inversions,
            SvType::Del => &mut self.deletions,
            SvType::Ins => &mut self.insertions,
            SvType::Cnv => &mut self.copy_number_variations,
            SvType::Unk => &mut self.unknown,
        }
    }

    /// Total number of records across all kinds
    #[must_use]
    pub fn len(&self) -> usize {
        SvType::ALL.iter().map(|kind| self.get(*kind).len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn unresolved_chromosomes(&self) -> usize {
        self.unresolved_chromosomes
    }

    /// Iterate over every record, kind by kind
    pub fn iter(&self) -> impl Iterator<Item = &VariantRecord> {
        SvType::ALL.iter().flat_map(move |kind| self.get(*kind).iter())
    }

    #[must_use]
    pub fn stats(&self, name: impl Into<String>) -> CollectionStats {
        CollectionStats {
            name: name.into(),
            translocations: self.translocations.len(),
            duplications: self.duplications.len(),
            inversions: self.inversions.len(),
            deletions: self.deletions.len(),
            insertions: self.insertions.len(),
            copy_number_variations: self.copy_number_variations.len(),
            unknown: self.unknown.len(),
            unresolved_chromosomes: self.unresolved_chromosomes,
        }
    }
}

/// Accumulates records into a [`VariantCollection`] while an input is parsed
#[derive(Debug, Default)]
pub struct VariantCollectionBuilder {
    collection: VariantCollection,
    remove_duplicates: bool,
}

impl VariantCollectionBuilder {
    #[must_use]
    pub fn new(remove_duplicates: bool) -> Self {
        Self {
            collection: VariantCollection::default(),
            remove_duplicates,
        }
    }

    /// Assign `kind` to the record and append it to the matching partition.
    ///
    /// When duplicate removal is enabled, a record equal to one already in the
    /// partition is dropped.
    pub fn add(&mut self, mut record: VariantRecord, kind: SvType) {
        record.set_kind(kind);

        let remove_duplicates = self.remove_duplicates;
        let unresolved = !record.has_resolved_chromosomes();
        let variants = self.collection.get_mut(kind);

        if remove_duplicates && variants.contains(&record) {
            return;
        }

        variants.push(record);

        if unresolved {
            self.collection.unresolved_chromosomes += 1;
        }
    }

    #[must_use]
    pub fn build(self) -> VariantCollection {
        self.collection
    }
}

/// Per-kind record counts for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub name: String,
    pub translocations: usize,
    pub duplications: usize,
    pub inversions: usize,
    pub deletions: usize,
    pub insertions: usize,
    pub copy_number_variations: usize,
    pub unknown: usize,
    pub unresolved_chromosomes: usize,
}

impl std::fmt::Display for CollectionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} statistics:", self.name)?;
        writeln!(f, "Translocations (BND):\t{}", self.translocations)?;
        writeln!(f, "Duplications (DUP):\t{}", self.duplications)?;
        writeln!(f, "Inversions (INV):\t{}", self.inversions)?;
        writeln!(f, "Deletions (DEL):\t{}", self.deletions)?;
        writeln!(f, "Insertions (INS):\t{}", self.insertions)?;
        writeln!(f, "Copy number var. (CNV):\t{}", self.copy_number_variations)?;
        write!(f, "Unknown SV type (UNK):\t{}", self.unknown)
    }
}
