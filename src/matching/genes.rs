/// Split a gene annotation into upper-cased symbols.
///
/// Blank annotations yield no symbols. Empty tokens between or after
/// separators (`"A;;B"`, `"A;"`) are dropped, so two annotations never share
/// an empty symbol.
pub fn gene_symbols(gene: &str) -> Vec<String> {
    if gene.trim().is_empty() {
        return Vec::new();
    }

    gene.to_uppercase()
        .split(['/', ';'])
        .filter(|symbol| !symbol.is_empty())
        .map(str::to_string)
        .collect()
}

/// Genes annotated on both variants, in the source annotation's order, each listed once.
///
/// Comparison is case-insensitive; a blank annotation on either side gives an
/// empty result.
pub fn common_genes(source_gene: &str, target_gene: &str) -> Vec<String> {
    let source = gene_symbols(source_gene);
    let target = gene_symbols(target_gene);

    if source.is_empty() || target.is_empty() {
        return Vec::new();
    }

    let mut common: Vec<String> = Vec::new();
    for gene in source {
        if target.contains(&gene) && !common.contains(&gene) {
            common.push(gene);
        }
    }

    common
}
