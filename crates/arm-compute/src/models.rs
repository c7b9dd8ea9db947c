//! Virtual machine models for the `Microsoft.Compute` provider.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A virtual machine resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VirtualMachine {
    /// Fully qualified resource id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resource name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Resource type, `Microsoft.Compute/virtualMachines`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Region the machine lives in.
    pub location: String,
    /// Resource tags.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
    /// Machine properties envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<VirtualMachineProperties>,
}

/// Properties envelope of a [`VirtualMachine`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineProperties {
    /// Sizing of the machine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_profile: Option<HardwareProfile>,
    /// Disks attached to the machine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_profile: Option<StorageProfile>,
    /// Provisioning state reported by the service; read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<String>,
}

/// Machine size selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProfile {
    /// Size name, e.g. `Standard_A0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vm_size: Option<String>,
}

/// Disks attached to a machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageProfile {
    /// The operating system disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_disk: Option<OsDisk>,
    /// Additional data disks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_disks: Vec<DataDisk>,
}

/// The operating system disk of a machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OsDisk {
    /// Disk name.
    pub name: String,
    /// Backing blob.
    pub vhd: VirtualHardDisk,
    /// Source image when the disk is created from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<VirtualHardDisk>,
    /// Host caching behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caching: Option<Caching>,
    /// How the disk comes into being.
    pub create_option: DiskCreateOptionType,
    /// Operating system on the disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
}

/// A data disk attached to a machine.
///
/// `vhd` and `image` are mutually exclusive when `create_option` is
/// `FromImage`; the service rejects requests that set both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataDisk {
    /// Logical unit number, unique per machine.
    pub lun: i32,
    /// Disk name.
    pub name: String,
    /// Backing blob.
    pub vhd: VirtualHardDisk,
    /// Source image when the disk is created from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<VirtualHardDisk>,
    /// Host caching behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caching: Option<Caching>,
    /// How the disk comes into being.
    pub create_option: DiskCreateOptionType,
    /// Size in gigabytes; required when `create_option` is `Empty`.
    #[serde(rename = "diskSizeGB", default, skip_serializing_if = "Option::is_none")]
    pub disk_size_gb: Option<i32>,
}

/// A blob URI naming a virtual hard disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VirtualHardDisk {
    /// Blob URI of the disk.
    pub uri: String,
}

/// Host caching behavior for a disk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Caching {
    /// No host caching.
    None,
    /// Read caching only.
    ReadOnly,
    /// Read and write caching.
    ReadWrite,
}

/// How a disk comes into being. Wire casing is lowerCamel per the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiskCreateOptionType {
    /// Create from a platform or user image.
    #[serde(rename = "fromImage")]
    FromImage,
    /// Create an empty disk of `diskSizeGB` gigabytes.
    #[serde(rename = "empty")]
    Empty,
    /// Attach an existing vhd.
    #[serde(rename = "attach")]
    Attach,
}
