//! Built-in catalog shipped with the site.

use crate::model::catalog::{Article, Catalog, CatalogData, Channel, PathStep, Tool};
use crate::model::message::Message;
use std::collections::BTreeMap;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn article(
    id: &str,
    title: &str,
    excerpt: &str,
    tag_list: &[&str],
    author: &str,
    date: &str,
) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        tags: tags(tag_list),
        author: author.to_string(),
        date: date.to_string(),
    }
}

fn tool(
    id: &str,
    name: &str,
    category: &str,
    description: &str,
    url: &str,
    tag_list: &[&str],
) -> Tool {
    Tool {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        tags: tags(tag_list),
    }
}

fn step(id: &str, label: &str, duration_min: u32) -> PathStep {
    PathStep {
        id: id.to_string(),
        label: label.to_string(),
        duration_min,
    }
}

fn channel(id: &str, name: &str) -> Channel {
    Channel {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Returns the raw built-in catalog document.
///
/// Seed message timestamps are relative to `now_ms`.
pub fn builtin_catalog_data(now_ms: i64) -> CatalogData {
    let articles = vec![
        article(
            "b1",
            "Shift-Left Security: Catch Issues Before Prod",
            "Integrating security tests early reduces MTTR and prevents costly rollbacks. Learn the practical patterns.",
            &["shift-left", "testing", "sast"],
            "Aisha Khan",
            "2025-07-21",
        ),
        article(
            "b2",
            "Policy as Code: Enforce Guardrails, Not Roadblocks",
            "OPA/Rego and Kubernetes admission controls enable scalable security without slowing developers down.",
            &["opa", "k8s", "policy"],
            "Liam Chen",
            "2025-06-12",
        ),
        article(
            "b3",
            "Secrets Management in CI/CD Done Right",
            "From short-lived credentials to workload identity, see how modern pipelines eliminate secret sprawl.",
            &["secrets", "identity", "cicd"],
            "Noah Patel",
            "2025-05-03",
        ),
        article(
            "b4",
            "Supply Chain Security: SBOMs, Signing, and Provenance",
            "Sigstore, SLSA, and SBOMs form the backbone of resilient software supply chains.",
            &["sbom", "slsa", "sigstore"],
            "Maya Rivera",
            "2025-08-02",
        ),
        article(
            "b5",
            "Runtime Security with eBPF: Observe, Detect, Respond",
            "eBPF-based tooling delivers low-overhead, high-fidelity runtime visibility across clusters.",
            &["ebpf", "runtime", "observability"],
            "Jon Park",
            "2025-04-14",
        ),
        article(
            "b6",
            "Threat Modeling for Cloud-Native Systems",
            "Rapid, iterative threat modeling aligned with delivery cycles improves real risk coverage.",
            &["threat-modeling", "cloud-native"],
            "Priya Singh",
            "2025-02-17",
        ),
    ];

    let tools = vec![
        tool(
            "t1",
            "Trivy",
            "Scanning",
            "Comprehensive scanner for containers, IaC, and code dependencies.",
            "https://aquasecurity.github.io/trivy/",
            &["containers", "iac", "deps"],
        ),
        tool(
            "t2",
            "Semgrep",
            "SAST",
            "Fast, developer-friendly static analysis with easy rules.",
            "https://semgrep.dev/",
            &["sast", "code"],
        ),
        tool(
            "t3",
            "Sigstore Cosign",
            "Supply Chain",
            "Sign, verify, and attest container images and artifacts.",
            "https://docs.sigstore.dev/cosign/overview/",
            &["signing", "supply-chain"],
        ),
        tool(
            "t4",
            "OPA / Rego",
            "Policy",
            "Policy-as-code engine to enforce guardrails in CI/CD and clusters.",
            "https://www.openpolicyagent.org/",
            &["policy", "opa"],
        ),
        tool(
            "t5",
            "Falco",
            "Runtime",
            "Runtime security detection engine powered by eBPF.",
            "https://falco.org/",
            &["runtime", "ebpf"],
        ),
        tool(
            "t6",
            "in-toto",
            "Supply Chain",
            "Framework to secure the integrity of software supply chains.",
            "https://in-toto.io/",
            &["provenance", "supply-chain"],
        ),
    ];

    let path = vec![
        step("p1", "Foundations: Git, Linux, Networking", 240),
        step("p2", "Containers: Docker Essentials", 180),
        step("p3", "Kubernetes: Core Workloads", 300),
        step("p4", "CI/CD: Pipelines & GitOps", 240),
        step("p5", "Security: SAST, DAST, IaC Scanning", 240),
        step("p6", "Supply Chain: SBOMs & Signing", 180),
        step("p7", "Runtime: Observability & eBPF", 180),
    ];

    let channels = vec![
        channel("c1", "#general"),
        channel("c2", "#devsecops-news"),
        channel("c3", "#help"),
    ];

    let mut initial_messages = BTreeMap::new();
    initial_messages.insert(
        "#general".to_string(),
        vec![Message::with_id(
            "m1",
            "System",
            "Welcome to the DevSecOps community!",
            now_ms - DAY_MS,
        )],
    );
    initial_messages.insert(
        "#devsecops-news".to_string(),
        vec![Message::with_id(
            "m2",
            "Bot",
            "New post: Sigstore and SLSA in action.",
            now_ms - HOUR_MS,
        )],
    );
    initial_messages.insert(
        "#help".to_string(),
        vec![Message::with_id(
            "m3",
            "System",
            "Ask questions and help others.",
            now_ms - 2 * HOUR_MS,
        )],
    );

    CatalogData {
        articles,
        tools,
        path,
        channels,
        initial_messages,
    }
}

impl Catalog {
    /// Returns the built-in catalog with seed timestamps relative to `now_ms`.
    pub fn builtin(now_ms: i64) -> Self {
        Catalog::new(builtin_catalog_data(now_ms)).expect("valid built-in catalog")
    }
}
