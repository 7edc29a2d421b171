//! Canned forms and results for sample-data mode.

use crate::discovery::{DatasetItem, DatasetResult, ResearchForm, SearchMetadata};
use crate::matching::{MatchForm, MatchItem, MatchResult};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn match_form() -> MatchForm {
    MatchForm {
        name: "Dr. Sarah Chen".to_string(),
        bio: "AI researcher with 10 years of experience in NLP and deep learning. Published 30+ papers in top-tier conferences. Passionate about ethical AI and building inclusive technology.".to_string(),
        preferences: "Collaborative researchers, interdisciplinary projects, open-source advocates".to_string(),
        intent: "Looking for co-investigators for a new project on bias detection in large language models, and potential industry partners for real-world applications.".to_string(),
    }
}

pub fn research_form() -> ResearchForm {
    ResearchForm {
        topic: "Transformer architectures for multimodal learning".to_string(),
        domain: "Computer Science".to_string(),
        data_type: "All Types".to_string(),
        year_from: "2020".to_string(),
        year_to: "2025".to_string(),
    }
}

pub fn match_result() -> MatchResult {
    MatchResult {
        matches: vec![
            MatchItem {
                name: "Dr. Alex Rivera".to_string(),
                title_or_role: "Senior Research Scientist at Google DeepMind".to_string(),
                compatibility_score: 92,
                reasoning: "Strong overlap in NLP research interests with complementary expertise in model interpretability. Dr. Rivera has published extensively on bias metrics and fairness in language models, making them an ideal collaborator for the proposed bias detection project.".to_string(),
                contextual_summary: "Leading expert in AI fairness with hands-on LLM experience and industry connections.".to_string(),
                shared_interests: strings(&["NLP", "Bias Detection", "Ethical AI", "Open Source", "Deep Learning"]),
                next_steps: strings(&["Schedule an introductory call", "Share recent publications", "Explore joint grant opportunities"]),
                confidence_level: "High".to_string(),
            },
            MatchItem {
                name: "Prof. Maria Gonzalez".to_string(),
                title_or_role: "Associate Professor, MIT CSAIL".to_string(),
                compatibility_score: 85,
                reasoning: "Extensive background in interdisciplinary AI research spanning linguistics and computer science. Currently leading a lab focused on inclusive NLP technologies, which aligns well with the ethical AI focus.".to_string(),
                contextual_summary: "Academic leader in inclusive NLP with strong publication record and grant funding.".to_string(),
                shared_interests: strings(&["Interdisciplinary Research", "NLP", "Inclusive Technology", "Academic Publishing"]),
                next_steps: strings(&["Review her recent EMNLP paper", "Reach out via academic network", "Propose a workshop collaboration"]),
                confidence_level: "High".to_string(),
            },
            MatchItem {
                name: "James Park".to_string(),
                title_or_role: "VP of AI Ethics, Anthropic".to_string(),
                compatibility_score: 78,
                reasoning: "Industry leader focused on responsible AI deployment. While not a traditional researcher, his position offers unique access to real-world LLM bias data and industry-scale testing environments.".to_string(),
                contextual_summary: "Industry executive bridging the gap between AI research and responsible deployment.".to_string(),
                shared_interests: strings(&["Ethical AI", "LLM Applications", "Industry-Academia Collaboration"]),
                next_steps: strings(&["Connect via LinkedIn", "Propose a data sharing agreement", "Explore sponsored research programs"]),
                confidence_level: "Medium".to_string(),
            },
            MatchItem {
                name: "Dr. Priya Sharma".to_string(),
                title_or_role: "Postdoctoral Fellow, Stanford HAI".to_string(),
                compatibility_score: 71,
                reasoning: "Emerging researcher with fresh perspectives on bias detection methodologies. Recent dissertation focused on cross-lingual bias patterns, offering a unique angle for the proposed project.".to_string(),
                contextual_summary: "Early-career researcher bringing novel cross-lingual bias detection approaches.".to_string(),
                shared_interests: strings(&["Bias Detection", "Cross-lingual NLP", "Open Source"]),
                next_steps: strings(&["Invite to join the research team", "Review dissertation findings", "Discuss postdoc collaboration"]),
                confidence_level: "Medium".to_string(),
            },
        ],
        intent_summary: "The user seeks collaborative partners for bias detection research in LLMs, emphasizing interdisciplinary collaboration and real-world application through industry partnerships.".to_string(),
        overall_analysis: "Strong matches found across academia and industry. The profile indicates a well-established researcher with clear goals, enabling high-confidence recommendations. Priority matches combine complementary skills in fairness, NLP, and ethics.".to_string(),
        total_matches: 4,
    }
}

pub fn dataset_result() -> DatasetResult {
    DatasetResult {
        datasets: vec![
            DatasetItem {
                title: "Vision-Language Transformer Benchmark Suite (VL-TBS)".to_string(),
                source: "arXiv:2401.12345".to_string(),
                source_type: "Benchmark".to_string(),
                relevance_score: 94,
                contextual_summary: "Comprehensive benchmark suite for evaluating multimodal transformers across 15 vision-language tasks. Includes standardized evaluation metrics and baseline results for CLIP, BLIP-2, and LLaVA architectures.".to_string(),
                methodology_notes: "Uses stratified sampling across task difficulty levels. Includes both zero-shot and fine-tuned evaluation protocols with reproducibility guarantees.".to_string(),
                access_link: "https://arxiv.org/abs/2401.12345".to_string(),
                next_steps: strings(&["Download evaluation scripts from GitHub", "Run baselines on your hardware", "Compare with your architecture"]),
                year: "2024".to_string(),
                authors: strings(&["Zhang, W.", "Liu, K.", "Patel, R."]),
            },
            DatasetItem {
                title: "MultiModal Fusion Architectures: A Survey".to_string(),
                source: "ACM Computing Surveys".to_string(),
                source_type: "Survey".to_string(),
                relevance_score: 88,
                contextual_summary: "Exhaustive survey covering 200+ papers on multimodal fusion strategies in transformer architectures. Categorizes approaches into early, late, and hybrid fusion with performance comparisons.".to_string(),
                methodology_notes: "Systematic literature review following PRISMA guidelines. Covers publications from 2020-2024 with quantitative meta-analysis of reported results.".to_string(),
                access_link: "https://dl.acm.org/doi/example".to_string(),
                next_steps: strings(&["Use taxonomy to position your work", "Identify research gaps", "Follow cited architectures"]),
                year: "2024".to_string(),
                authors: strings(&["Chen, A.", "Williams, B.", "Kumar, S.", "Davis, T."]),
            },
            DatasetItem {
                title: "CrossModal-3M: 3 Million Aligned Image-Text-Audio Triplets".to_string(),
                source: "HuggingFace Datasets".to_string(),
                source_type: "Dataset".to_string(),
                relevance_score: 82,
                contextual_summary: "Large-scale dataset of aligned image, text, and audio triplets collected from educational content. Designed for training and evaluating multimodal transformers on three-way alignment tasks.".to_string(),
                methodology_notes: "Web-scraped with automated quality filtering. Human validation on 10% sample shows 94% alignment accuracy.".to_string(),
                access_link: "https://huggingface.co/datasets/example".to_string(),
                next_steps: strings(&["Download a subset for prototyping", "Validate quality for your use case", "Consider augmentation strategies"]),
                year: "2023".to_string(),
                authors: strings(&["Thompson, L.", "Garcia, M."]),
            },
        ],
        research_landscape_summary: "The field of multimodal transformer architectures is rapidly evolving with significant advances in 2023-2024. Key trends include unified architectures that handle multiple modalities through shared attention mechanisms, efficient fusion strategies that reduce computational cost, and scaling laws specific to multimodal learning.".to_string(),
        total_results: 3,
        search_metadata: SearchMetadata {
            query_used: "Transformer architectures for multimodal learning".to_string(),
            sources_searched: strings(&["arXiv", "ACM Digital Library", "HuggingFace", "Semantic Scholar"]),
            filters_applied: "Domain: Computer Science, Years: 2020-2025, Types: All".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::DiscoveryWorkflow;
    use crate::matching::MatchWorkflow;
    use crate::workflow::Workflow;

    #[test]
    fn test_sample_forms_are_valid() {
        assert!(MatchWorkflow::validate(&match_form()).is_empty());
        assert!(DiscoveryWorkflow::validate(&research_form()).is_empty());
    }

    #[test]
    fn test_sample_counts_agree() {
        let matches = match_result();
        assert_eq!(matches.total_matches as usize, matches.matches.len());
        let datasets = dataset_result();
        assert_eq!(datasets.total_results as usize, datasets.datasets.len());
    }

    #[test]
    fn test_sample_scores_in_range() {
        assert!(match_result().matches.iter().all(|m| m.compatibility_score <= 100));
        assert!(dataset_result().datasets.iter().all(|d| d.relevance_score <= 100));
    }
}
