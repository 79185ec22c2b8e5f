//! Per-track recipes that assemble a project scaffold from static templates
//! plus completion-API output.
//!
//! The builder does not validate or reformat generated content; prompts for
//! structured artifacts demand raw output and a malformed response is
//! propagated as-is. Any failed generation call aborts the whole build, so
//! a partial artifact set is never returned.

use crate::error::Result;
use crate::generate::{GenerationRequest, TextGenerator};
use crate::track::{Idea, Track};
use std::collections::BTreeMap;

/// Relative file path -> text content, ordered for deterministic
/// materialization. Built fresh per (track, idea) pair and discarded after
/// the publish step.
pub type ArtifactSet = BTreeMap<String, String>;

const MAX_TOKENS: u32 = 4096;

pub struct ArtifactBuilder<'a> {
    generator: &'a dyn TextGenerator,
    model: String,
}

impl<'a> ArtifactBuilder<'a> {
    pub fn new(generator: &'a dyn TextGenerator, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    pub async fn build(&self, track: Track, idea: &Idea) -> Result<ArtifactSet> {
        match track {
            Track::Service => self.service(idea).await,
            Track::Skill => self.skill(idea).await,
            Track::Contract => self.contract(idea).await,
        }
    }

    async fn generated(&self, prompt: String, temperature: f32) -> Result<String> {
        let request = GenerationRequest {
            prompt,
            model: self.model.clone(),
            temperature,
            max_tokens: MAX_TOKENS,
        };
        self.generator.generate(&request).await
    }

    // -----------------------------------------------------------------------
    // Recipes
    // -----------------------------------------------------------------------

    async fn service(&self, idea: &Idea) -> Result<ArtifactSet> {
        let mut files = ArtifactSet::new();

        let server_prompt = format!(
            "Write an Express.js server for a service named \"{}\". It should accomplish: {}. \
             Expose a GET /health endpoint and a POST /api/{} endpoint implementing the core \
             behavior. Read the listen port from process.env.PORT. Add CORS and JSON body \
             parsing. Provide only raw JavaScript code, no markdown.",
            idea.title,
            idea.description,
            idea.slug()
        );
        files.insert("index.js".to_string(), self.generated(server_prompt, 0.2).await?);

        files.insert(
            "package.json".to_string(),
            package_manifest(
                &idea.slug(),
                idea.description,
                &[("express", "^4.18.2"), ("cors", "^2.8.5"), ("dotenv", "^16.0.3")],
            ),
        );

        let readme_prompt = format!(
            "Write a professional README.md for a Node.js service called \"{}\". It provides: {}. \
             Include sections: Problem, Solution, Architecture, Usage. Use proper Markdown.",
            idea.title, idea.description
        );
        files.insert("README.md".to_string(), self.generated(readme_prompt, 0.4).await?);

        files.insert(
            ".env.example".to_string(),
            format!("PORT=3000\nAPP_NAME={}\n", idea.title),
        );

        Ok(files)
    }

    async fn skill(&self, idea: &Idea) -> Result<ArtifactSet> {
        let mut files = ArtifactSet::new();

        let manifest_prompt = format!(
            "Generate a valid YAML manifest for an assistant skill named \"{}\" with description: \
             \"{}\". Include a systemPrompt field describing the agent's role for this skill and \
             an optional http tool if the skill needs one. Output only YAML, no backticks.",
            idea.title, idea.description
        );
        files.insert("skill.yaml".to_string(), self.generated(manifest_prompt, 0.3).await?);

        let readme_prompt = format!(
            "Write a README.md for an assistant skill called \"{}\" that does the following: {}. \
             Include Installation, Capabilities, Examples. Use Markdown.",
            idea.title, idea.description
        );
        files.insert("README.md".to_string(), self.generated(readme_prompt, 0.4).await?);

        files.insert(
            "index.js".to_string(),
            format!("console.log('{} loaded');\n", idea.title),
        );

        Ok(files)
    }

    async fn contract(&self, idea: &Idea) -> Result<ArtifactSet> {
        let mut files = ArtifactSet::new();
        let contract_name = contract_name(idea);

        let contract_prompt = format!(
            "Write a Solidity smart contract named {contract_name}. Purpose: {}. Use Solidity \
             ^0.8.19, SPDX license MIT. Include an event and a basic function. Add NatSpec \
             comments. Output only the .sol file content.",
            idea.description
        );
        files.insert(
            format!("contracts/{contract_name}.sol"),
            self.generated(contract_prompt, 0.2).await?,
        );

        files.insert(
            "hardhat.config.js".to_string(),
            "require('@nomicfoundation/hardhat-toolbox');\n\n\
             module.exports = {\n  solidity: '0.8.19',\n  networks: {\n    hardhat: {},\n    \
             sepolia: {\n      url: process.env.RPC_URL || '',\n      accounts: \
             process.env.DEPLOYER_KEY ? [process.env.DEPLOYER_KEY] : []\n    }\n  }\n};\n"
                .to_string(),
        );

        files.insert(
            "package.json".to_string(),
            hardhat_manifest(&idea.slug()),
        );

        files.insert(
            "scripts/deploy.js".to_string(),
            format!(
                "const hre = require('hardhat');\n\nasync function main() {{\n  \
                 const contract = await hre.ethers.deployContract('{contract_name}');\n  \
                 await contract.waitForDeployment();\n  \
                 console.log('{contract_name} deployed to:', await contract.getAddress());\n}}\n\n\
                 main().catch((error) => {{\n  console.error(error);\n  \
                 process.exitCode = 1;\n}});\n"
            ),
        );

        let readme_prompt = format!(
            "Write a README.md for a Solidity smart contract project called \"{}\". It \
             implements: {}. Include Purpose, Deployment, Verification sections in Markdown.",
            idea.title, idea.description
        );
        files.insert("README.md".to_string(), self.generated(readme_prompt, 0.4).await?);

        files.insert(".env.example".to_string(), "RPC_URL=\nDEPLOYER_KEY=\n".to_string());

        Ok(files)
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

fn contract_name(idea: &Idea) -> String {
    idea.title.split_whitespace().collect()
}

fn package_manifest(name: &str, description: &str, dependencies: &[(&str, &str)]) -> String {
    let deps: serde_json::Map<String, serde_json::Value> = dependencies
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect();
    let manifest = serde_json::json!({
        "name": name,
        "version": "0.1.0",
        "description": description,
        "main": "index.js",
        "scripts": { "start": "node index.js" },
        "dependencies": deps,
    });
    format!("{:#}\n", manifest)
}

fn hardhat_manifest(name: &str) -> String {
    let manifest = serde_json::json!({
        "name": name,
        "version": "1.0.0",
        "scripts": {
            "compile": "hardhat compile",
            "test": "hardhat test",
            "deploy": "hardhat run scripts/deploy.js --network sepolia",
        },
        "devDependencies": {
            "hardhat": "^2.17.0",
            "@nomicfoundation/hardhat-toolbox": "^5.0.0",
            "@openzeppelin/contracts": "^5.0.0",
        },
    });
    format!("{:#}\n", manifest)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
