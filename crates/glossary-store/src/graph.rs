//! Visual-mapper relation graph builder.
//!
//! One request performs a single level of directed traversal around a root
//! node: one query per relation bucket, each row optionally carrying
//! second-hop existence evidence that only sizes the neighbor, never
//! recurses. Unlike every other operation, store failures on this path are
//! fatal and propagate to the caller.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use glossary_core::{Error, RelationNode, Relations, Result, RootType, SparqlClient};

use crate::queries;

/// Traversal-scoped counter shared across all relation buckets of one
/// request. Every newly discovered node — neighbor or second-hop
/// placeholder — increments it, and the final value becomes the root's
/// size. Kept explicit so the sizing invariant is visible at each
/// node-creation site.
struct TraversalContext {
    total: u64,
}

/// The three relation buckets, with their SPARQL variable prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelationKind {
    Parents,
    Children,
    Related,
}

impl RelationKind {
    /// Variable prefix used by the relation queries: `?b`/`?n`/`?r` for the
    /// neighbor, `?bLabel`/... for its label, `?bb`/`?bn`/`?br`/... for
    /// second-hop evidence.
    fn var_prefix(self) -> &'static str {
        match self {
            RelationKind::Parents => "b",
            RelationKind::Children => "n",
            RelationKind::Related => "r",
        }
    }
}

/// Build the full visual mapper tree for the given root.
pub async fn build(
    store: &dyn SparqlClient,
    root_uri: Option<&str>,
    language: &str,
) -> Result<RelationNode> {
    let mut root = root_node(store, root_uri, language).await?;
    let root_type = root.node_type.expect("root node always carries a type");
    let mut ctx = TraversalContext { total: 1 };
    let mut relations = Relations::default();

    match root_type {
        RootType::Project => {
            let query = queries::scheme_children(language)?;
            relations.children =
                relation_data(store, &mut ctx, &query, RelationKind::Children).await?;
        }
        RootType::ConceptScheme => {
            let uri = root_uri.expect("non-project root has a URI");
            let query = queries::top_concepts(uri, language)?;
            relations.children =
                relation_data(store, &mut ctx, &query, RelationKind::Children).await?;
        }
        RootType::TopConcept => {
            let uri = root_uri.expect("non-project root has a URI");
            let query = queries::top_concept_parents(uri, language)?;
            relations.parents =
                relation_data(store, &mut ctx, &query, RelationKind::Parents).await?;
            let query = queries::concept_children(uri, language)?;
            relations.children =
                relation_data(store, &mut ctx, &query, RelationKind::Children).await?;
            let query = queries::concept_related(uri, language)?;
            relations.related =
                relation_data(store, &mut ctx, &query, RelationKind::Related).await?;
        }
        RootType::Concept => {
            let uri = root_uri.expect("non-project root has a URI");
            let query = queries::concept_parents(uri, language)?;
            relations.parents =
                relation_data(store, &mut ctx, &query, RelationKind::Parents).await?;
            let query = queries::concept_children(uri, language)?;
            relations.children =
                relation_data(store, &mut ctx, &query, RelationKind::Children).await?;
            let query = queries::concept_related(uri, language)?;
            relations.related =
                relation_data(store, &mut ctx, &query, RelationKind::Related).await?;
        }
    }

    root.size = ctx.total;
    root.relations = Some(relations);

    info!(
        subsystem = "graph",
        component = "visual_mapper",
        op = "build",
        root_type = ?root_type,
        language = language,
        node_count = ctx.total,
        "Visual mapper tree built"
    );
    Ok(root)
}

/// Create the root node and determine its type.
///
/// A missing URI yields the synthetic project root. Otherwise the type
/// lookup decides: a `skos:broader` triple makes it a concept, being the
/// target of `skos:hasTopConcept` makes it a top concept, anything else is
/// a concept scheme.
async fn root_node(
    store: &dyn SparqlClient,
    root_uri: Option<&str>,
    language: &str,
) -> Result<RelationNode> {
    let Some(uri) = root_uri else {
        return Ok(RelationNode {
            id: None,
            name: Some(String::new()),
            size: 1,
            node_type: Some(RootType::Project),
            relations: Some(Relations::default()),
        });
    };

    let query = queries::root_type(uri, language)?;
    let rows = store.select(&query).await?;
    let Some(row) = rows.first() else {
        return Err(Error::Query {
            message: format!("no label found for root <{uri}> in language {language:?}"),
            query,
        });
    };

    let node_type = if row.contains("concept") {
        RootType::Concept
    } else if row.contains("topConcept") {
        RootType::TopConcept
    } else {
        RootType::ConceptScheme
    };
    debug!(
        subsystem = "graph",
        component = "visual_mapper",
        op = "root_node",
        concept_uri = uri,
        root_type = ?node_type,
        "Root type determined"
    );

    Ok(RelationNode {
        id: Some(uri.to_string()),
        name: Some(row.value("label").unwrap_or_default().to_string()),
        size: 1,
        node_type: Some(node_type),
        relations: Some(Relations::default()),
    })
}

/// Per-neighbor accumulator holding the relation buckets and the URIs
/// already counted under them.
struct NeighborAccum {
    node: RelationNode,
    seen: [HashSet<String>; 3],
    buckets: [Vec<RelationNode>; 3],
}

/// Execute one relation query and shape its rows into sized neighbor
/// nodes.
///
/// Every newly seen neighbor bumps the shared counter; every newly seen
/// second-hop edge bumps both the shared counter and the neighbor's own
/// size and appends an unlabeled placeholder leaf. Returns `None` when the
/// query matched nothing, so the caller omits the bucket entirely.
async fn relation_data(
    store: &dyn SparqlClient,
    ctx: &mut TraversalContext,
    query: &str,
    kind: RelationKind,
) -> Result<Option<Vec<RelationNode>>> {
    let rows = store.select(query).await?;

    let prefix = kind.var_prefix();
    let label_var = format!("{prefix}Label");
    // Second-hop variables in bucket order: parents, children, related.
    let hop_vars = [
        format!("{prefix}b"),
        format!("{prefix}n"),
        format!("{prefix}r"),
    ];

    let mut neighbors: Vec<NeighborAccum> = Vec::new();
    let mut index_by_uri: HashMap<String, usize> = HashMap::new();
    for row in &rows {
        let Some(uri) = row.uri(prefix) else { continue };

        let index = match index_by_uri.get(uri) {
            Some(index) => *index,
            None => {
                ctx.total += 1;
                neighbors.push(NeighborAccum {
                    node: RelationNode {
                        id: Some(uri.to_string()),
                        name: row.value(&label_var).map(str::to_string),
                        size: 1,
                        node_type: None,
                        relations: None,
                    },
                    seen: Default::default(),
                    buckets: Default::default(),
                });
                index_by_uri.insert(uri.to_string(), neighbors.len() - 1);
                neighbors.len() - 1
            }
        };

        let neighbor = &mut neighbors[index];
        for (bucket, hop_var) in hop_vars.iter().enumerate() {
            if let Some(hop_uri) = row.uri(hop_var) {
                if neighbor.seen[bucket].insert(hop_uri.to_string()) {
                    ctx.total += 1;
                    neighbor.node.size += 1;
                    neighbor.buckets[bucket].push(RelationNode::leaf(hop_uri));
                }
            }
        }
    }

    if neighbors.is_empty() {
        return Ok(None);
    }

    let mut nodes: Vec<RelationNode> = neighbors
        .into_iter()
        .map(|mut accumulator| {
            let [parents, children, related] = accumulator.buckets;
            let relations = Relations {
                parents: (!parents.is_empty()).then_some(parents),
                children: (!children.is_empty()).then_some(children),
                related: (!related.is_empty()).then_some(related),
            };
            if !relations.is_empty() {
                accumulator.node.relations = Some(relations);
            }
            accumulator.node
        })
        .collect();

    // Descending by subtree size; Vec::sort_by is stable, so ties keep
    // discovery order.
    nodes.sort_by(|a, b| b.size.cmp(&a.size));
    Ok(Some(nodes))
}
