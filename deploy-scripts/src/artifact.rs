//! Loading compiled contract artifacts from the build output directory

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::Bytes;
use serde::Deserialize;

use crate::{
    constants::{JSON_EXTENSION, SOLIDITY_EXTENSION},
    errors::DeployError,
};

/// The subset of a compilation artifact needed for deployment
#[derive(Deserialize)]
struct RawArtifact {
    /// The creation bytecode
    bytecode: RawBytecode,
}

/// Creation bytecode as emitted by the supported toolchains
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Foundry nests the hex string under `object`
    Object {
        /// The hex-encoded bytecode
        object: Bytes,
    },
    /// Hardhat stores the hex string directly
    Hex(Bytes),
}

/// A compiled contract, ready to be deployed
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    /// The contract name
    pub name: String,
    /// The file the artifact was read from
    pub path: PathBuf,
    /// The creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Read the artifact for `name` from `artifacts_dir`.
    ///
    /// Both the Foundry layout (`<dir>/<Name>.sol/<Name>.json`) and a flat
    /// layout (`<dir>/<Name>.json`) are accepted, in that order.
    pub fn load(artifacts_dir: &Path, name: &str) -> Result<Self, DeployError> {
        let path = artifact_paths(artifacts_dir, name)
            .into_iter()
            .find(|path| path.is_file())
            .ok_or_else(|| {
                DeployError::ReadArtifact(format!(
                    "no artifact for {name} in {}, has the contract been compiled?",
                    artifacts_dir.display()
                ))
            })?;

        let contents = fs::read_to_string(&path).map_err(|e| {
            DeployError::ReadArtifact(format!("{}: {e}", path.display()))
        })?;

        Self::from_json(name, path, &contents)
    }

    /// Parse an artifact from its JSON contents
    pub fn from_json(name: &str, path: PathBuf, contents: &str) -> Result<Self, DeployError> {
        let raw: RawArtifact = serde_json::from_str(contents)
            .map_err(|e| DeployError::ArtifactParsing(format!("{}: {e}", path.display())))?;

        let bytecode = match raw.bytecode {
            RawBytecode::Object { object } => object,
            RawBytecode::Hex(bytes) => bytes,
        };

        if bytecode.is_empty() {
            return Err(DeployError::ArtifactParsing(format!(
                "{name} has no creation bytecode, is it abstract or an interface?"
            )));
        }

        Ok(Self { name: name.to_string(), path, bytecode })
    }
}

/// The candidate artifact locations for a contract, in lookup order
fn artifact_paths(artifacts_dir: &Path, name: &str) -> [PathBuf; 2] {
    let file_name = format!("{name}.{JSON_EXTENSION}");
    [
        artifacts_dir.join(format!("{name}.{SOLIDITY_EXTENSION}")).join(&file_name),
        artifacts_dir.join(file_name),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "V3PositionHelper";

    #[test]
    fn test_foundry_layout() {
        let dir = tempfile::tempdir().unwrap();
        let contract_dir = dir.path().join("V3PositionHelper.sol");
        fs::create_dir(&contract_dir).unwrap();
        fs::write(
            contract_dir.join("V3PositionHelper.json"),
            r#"{"abi": [], "bytecode": {"object": "0x6080604052", "linkReferences": {}}}"#,
        )
        .unwrap();

        let artifact = ContractArtifact::load(dir.path(), NAME).unwrap();
        assert_eq!(artifact.name, NAME);
        assert_eq!(artifact.bytecode, Bytes::from(vec![0x60, 0x80, 0x60, 0x40, 0x52]));
        assert!(artifact.path.ends_with("V3PositionHelper.sol/V3PositionHelper.json"));
    }

    #[test]
    fn test_flat_layout() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("V3PositionHelper.json"),
            r#"{"contractName": "V3PositionHelper", "abi": [], "bytecode": "0x6080"}"#,
        )
        .unwrap();

        let artifact = ContractArtifact::load(dir.path(), NAME).unwrap();
        assert_eq!(artifact.bytecode, Bytes::from(vec![0x60, 0x80]));
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContractArtifact::load(dir.path(), NAME).unwrap_err();
        assert!(matches!(err, DeployError::ReadArtifact(_)));
    }

    #[test]
    fn test_empty_bytecode_rejected() {
        let err = ContractArtifact::from_json(
            "IPositionHelper",
            PathBuf::from("IPositionHelper.json"),
            r#"{"bytecode": {"object": "0x"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeployError::ArtifactParsing(_)));
    }

    #[test]
    fn test_malformed_artifact() {
        let err = ContractArtifact::from_json(NAME, PathBuf::from("x.json"), r#"{"abi": []}"#)
            .unwrap_err();
        assert!(matches!(err, DeployError::ArtifactParsing(_)));
    }
}
