// CLI enums -> analysis enums

use cardeps_graph::{CollisionPolicy, DescriptorLayout, PropertyCapture, Strategy};

use crate::cli::{CollisionArg, DescriptorLayoutArg, PropertyCaptureArg, StrategyArg};

impl From<StrategyArg> for Strategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Regex => Strategy::Regex,
            StrategyArg::Structural => Strategy::Structural,
            StrategyArg::Both => Strategy::Both,
        }
    }
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(c: CollisionArg) -> Self {
        match c {
            CollisionArg::Override => CollisionPolicy::Override,
            CollisionArg::Reject => CollisionPolicy::Reject,
        }
    }
}

impl From<PropertyCaptureArg> for PropertyCapture {
    fn from(p: PropertyCaptureArg) -> Self {
        match p {
            PropertyCaptureArg::Call => PropertyCapture::Call,
            PropertyCaptureArg::Name => PropertyCapture::Name,
        }
    }
}

impl From<DescriptorLayoutArg> for DescriptorLayout {
    fn from(l: DescriptorLayoutArg) -> Self {
        match l {
            DescriptorLayoutArg::Src => DescriptorLayout::Src,
            DescriptorLayoutArg::Grandparent => DescriptorLayout::Grandparent,
        }
    }
}
