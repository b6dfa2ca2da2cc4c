//! Node kinds: the typed icons a diagram is drawn with.
//!
//! A [`NodeKind`] names a provider service ("AWS Lambda", "Amazon S3") and the
//! [`Category`] it belongs to. Icon artwork is out of scope, so each category
//! maps to a Graphviz shape and a fill color that stand in for the icon.
//!
//! The constants in [`aws`], [`onprem`] and [`generic`] mirror the service
//! catalogs of the usual diagrams-as-code libraries.

use std::fmt;

/// Who provides the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Aws,
    OnPrem,
    Generic,
}

impl Provider {
    /// Lowercase provider segment of a catalog path, e.g. `"onprem"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::OnPrem => "onprem",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Compute,
    Storage,
    Database,
    Network,
    Security,
    Devtools,
    Integration,
    Ml,
    Management,
    Client,
    Device,
}

impl Category {
    /// Lowercase category segment of a catalog path, e.g. `"compute"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Storage => "storage",
            Self::Database => "database",
            Self::Network => "network",
            Self::Security => "security",
            Self::Devtools => "devtools",
            Self::Integration => "integration",
            Self::Ml => "ml",
            Self::Management => "management",
            Self::Client => "client",
            Self::Device => "device",
        }
    }

    /// Graphviz node shape used in place of the category icon.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Compute => "box",
            Self::Storage => "folder",
            Self::Database => "cylinder",
            Self::Network => "hexagon",
            Self::Security => "octagon",
            Self::Devtools => "component",
            Self::Integration => "cds",
            Self::Ml => "box3d",
            Self::Management => "tab",
            Self::Client => "ellipse",
            Self::Device => "rect",
        }
    }

    /// Fill color, taken from the AWS architecture icon palette.
    pub fn fill_color(&self) -> &'static str {
        match self {
            Self::Compute => "#ED7100",
            Self::Storage => "#7AA116",
            Self::Database => "#C925D1",
            Self::Network => "#8C4FFF",
            Self::Security => "#DD344C",
            Self::Devtools => "#3B48CC",
            Self::Integration => "#E7157B",
            Self::Ml => "#01A88D",
            Self::Management => "#D6246E",
            Self::Client | Self::Device => "#5A6B86",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed icon: provider, category and service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKind {
    provider: Provider,
    category: Category,
    service: &'static str,
}

impl NodeKind {
    /// Creates a node kind.
    ///
    /// `const` so the catalogs below can be plain constants.
    ///
    /// # Arguments
    ///
    /// * `provider` - Who provides the service.
    /// * `category` - Category that decides the Graphviz shape and fill.
    /// * `service` - Service name as it appears in the catalog path.
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::kind::{Category, NodeKind, Provider};
    ///
    /// let kind = NodeKind::new(Provider::Aws, Category::Storage, "Glacier");
    /// assert_eq!(kind.to_string(), "aws.storage.Glacier");
    /// assert_eq!(kind.category().shape(), "folder");
    /// ```
    pub const fn new(provider: Provider, category: Category, service: &'static str) -> Self {
        Self {
            provider,
            category,
            service,
        }
    }

    /// Returns the provider.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Returns the category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the service name, e.g. `"Lambda"`.
    pub fn service(&self) -> &'static str {
        self.service
    }
}

impl fmt::Display for NodeKind {
    /// Formats as `provider.category.Service`, the import path of the icon
    /// in diagrams-as-code catalogs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.provider, self.category, self.service)
    }
}

/// Amazon Web Services.
pub mod aws {
    use super::{Category::*, NodeKind, Provider::Aws};

    pub const LAMBDA: NodeKind = NodeKind::new(Aws, Compute, "Lambda");
    pub const ECS: NodeKind = NodeKind::new(Aws, Compute, "ECS");
    pub const S3: NodeKind = NodeKind::new(Aws, Storage, "S3");
    pub const DYNAMODB: NodeKind = NodeKind::new(Aws, Database, "Dynamodb");
    pub const ELASTICACHE: NodeKind = NodeKind::new(Aws, Database, "ElastiCache");
    pub const API_GATEWAY: NodeKind = NodeKind::new(Aws, Network, "APIGateway");
    pub const CLOUDFRONT: NodeKind = NodeKind::new(Aws, Network, "CloudFront");
    /// Application Load Balancer.
    pub const ALB: NodeKind = NodeKind::new(Aws, Network, "ALB");
    pub const COGNITO: NodeKind = NodeKind::new(Aws, Security, "Cognito");
    pub const IAM: NodeKind = NodeKind::new(Aws, Security, "IAM");
    /// AWS Security Token Service.
    pub const STS: NodeKind = NodeKind::new(Aws, Security, "IAMAWSSts");
    pub const XRAY: NodeKind = NodeKind::new(Aws, Devtools, "XRay");
    pub const SNS: NodeKind = NodeKind::new(Aws, Integration, "SNS");
    pub const SQS: NodeKind = NodeKind::new(Aws, Integration, "SQS");
    pub const EVENTBRIDGE: NodeKind = NodeKind::new(Aws, Integration, "Eventbridge");
    pub const SAGEMAKER: NodeKind = NodeKind::new(Aws, Ml, "Sagemaker");
    pub const CLOUDWATCH: NodeKind = NodeKind::new(Aws, Management, "Cloudwatch");
}

/// On-premises infrastructure.
pub mod onprem {
    use super::{Category::Client, NodeKind, Provider::OnPrem};

    pub const USERS: NodeKind = NodeKind::new(OnPrem, Client, "Users");
}

/// Provider-neutral icons.
pub mod generic {
    use super::{Category::Device, NodeKind, Provider::Generic};

    pub const MOBILE: NodeKind = NodeKind::new(Generic, Device, "Mobile");
}
