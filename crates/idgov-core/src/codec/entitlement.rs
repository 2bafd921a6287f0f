//! Entitlement codec: per-target blocks of the policy's entitlement list.

use tracing::{debug, warn};

use crate::codec::parameter;
use crate::codec::resolve::Resolvers;
use crate::error::Result;
use crate::model::policy::ALL_SERVICES;
use crate::model::{EntitlementSpec, PolicyEntitlements, ServiceTarget, TargetKind};
use crate::wire::{
    ArrayOf, WSProvisioningParameters, WSProvisioningPolicyEntitlement, WSServiceTarget,
    OWNERSHIP_INDIVIDUAL,
};

/// Classify a target key: `*` is every service, anything mentioning
/// "profile" (any case) is a service profile, the rest is a specific service.
pub fn classify_target(target: &str) -> TargetKind {
    if target == ALL_SERVICES {
        TargetKind::All
    } else if target.to_lowercase().contains("profile") {
        TargetKind::Profile
    } else {
        TargetKind::Specific
    }
}

/// Build the service-target record. Only specific targets are resolved.
pub fn service_target(target: &str, resolvers: Resolvers<'_>) -> Result<ServiceTarget> {
    let kind = classify_target(target);
    let name = match kind {
        TargetKind::Specific => resolvers.services.resolve_service(target)?,
        TargetKind::Profile | TargetKind::All => target.to_string(),
    };
    Ok(ServiceTarget { name, kind })
}

/// Encode one entitlement block.
pub fn encode_one(
    target: &str,
    spec: &EntitlementSpec,
    resolvers: Resolvers<'_>,
) -> Result<WSProvisioningPolicyEntitlement> {
    let st = service_target(target, resolvers)?;

    let process_dn = match &spec.workflow {
        Some(name) => Some(resolvers.workflows.resolve_workflow(name)?),
        None => None,
    };

    let params = spec
        .parameters
        .iter()
        .map(|(attr, values)| parameter::encode(attr, values))
        .collect::<Vec<_>>();

    debug!(
        service = %target,
        target_type = st.kind.code(),
        automatic = spec.automatic,
        parameters = params.len(),
        "entitlement encoded"
    );

    Ok(WSProvisioningPolicyEntitlement {
        ownership_type: OWNERSHIP_INDIVIDUAL.to_string(),
        provisioning_type: i32::from(spec.automatic),
        service_target: WSServiceTarget {
            name: st.name,
            target_type: st.kind.code(),
        },
        parameters: Some(WSProvisioningParameters {
            parameters: Some(ArrayOf::new(params)),
        }),
        process_dn,
    })
}

/// Encode every entitlement, in map order.
pub fn encode(
    targets: &PolicyEntitlements,
    resolvers: Resolvers<'_>,
) -> Result<ArrayOf<WSProvisioningPolicyEntitlement>> {
    targets
        .iter()
        .map(|(target, spec)| encode_one(target, spec, resolvers))
        .collect::<Result<Vec<_>>>()
        .map(ArrayOf::new)
}

/// Decode one entitlement block into `(target, spec)`.
///
/// The target is whatever name the service stored (a DN for specific
/// services) and the workflow is the raw process DN; neither is mapped back
/// to a friendly name. An attribute listed more than once keeps all of its
/// constraints, in wire order.
pub fn decode_one(ws: &WSProvisioningPolicyEntitlement) -> Result<(String, EntitlementSpec)> {
    let mut spec = EntitlementSpec {
        automatic: ws.provisioning_type == 1,
        workflow: ws.process_dn.clone(),
        parameters: Default::default(),
    };

    let wire_params = ws
        .parameters
        .as_ref()
        .and_then(|p| p.parameters.as_ref())
        .map(|a| a.item.as_slice())
        .unwrap_or_default();

    for wp in wire_params {
        let values = parameter::decode(wp)?;
        match spec.parameters.get_mut(&wp.name) {
            Some(existing) => {
                warn!(attribute = %wp.name, "attribute repeated in wire record; merging constraints");
                existing.extend(values);
            }
            None => {
                spec.parameters.insert(wp.name.clone(), values);
            }
        }
    }

    Ok((ws.service_target.name.clone(), spec))
}

/// Decode an entitlement list. A target repeated in the list keeps the last block.
pub fn decode(list: &ArrayOf<WSProvisioningPolicyEntitlement>) -> Result<PolicyEntitlements> {
    let mut out = PolicyEntitlements::new();
    for ws in &list.item {
        let (target, spec) = decode_one(ws)?;
        if out.insert(target.clone(), spec).is_some() {
            warn!(service = %target, "target repeated in wire record; keeping the later entitlement");
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::codec::resolve::ResolvedReferences;
    use crate::model::{Enforcement, ParameterValue};

    fn spec(automatic: bool) -> EntitlementSpec {
        EntitlementSpec::new(automatic)
    }

    #[test]
    fn target_classification() {
        assert_eq!(classify_target("*"), TargetKind::All);
        assert_eq!(classify_target("SomeProfile"), TargetKind::Profile);
        assert_eq!(classify_target("ADprofile"), TargetKind::Profile);
        assert_eq!(classify_target("PROFILE x"), TargetKind::Profile);
        assert_eq!(classify_target("erglobalid=42,ou=services,dc=acme"), TargetKind::Specific);
        assert_eq!(classify_target("**"), TargetKind::Specific);
    }

    #[test]
    fn service_target_records() {
        let r = Resolvers::pass_through();
        let all = encode_one("*", &spec(false), r).unwrap();
        assert_eq!(all.service_target, WSServiceTarget { name: "*".into(), target_type: 2 });

        let prof = encode_one("SomeProfile", &spec(false), r).unwrap();
        assert_eq!(
            prof.service_target,
            WSServiceTarget { name: "SomeProfile".into(), target_type: 0 }
        );

        let one = encode_one("erglobalid=42", &spec(false), r).unwrap();
        assert_eq!(one.service_target.target_type, 1);
        assert_eq!(one.ownership_type, "Individual");
    }

    #[test]
    fn automatic_flag_is_independent_of_target_type() {
        let r = Resolvers::pass_through();
        for target in ["*", "SomeProfile", "erglobalid=42"] {
            assert_eq!(encode_one(target, &spec(true), r).unwrap().provisioning_type, 1);
            assert_eq!(encode_one(target, &spec(false), r).unwrap().provisioning_type, 0);
        }
    }

    #[test]
    fn workflow_is_resolved_and_missing_ones_fail() {
        let mut refs = ResolvedReferences::new();
        refs.insert_workflow("Approve", "erglobalid=7,ou=workflow");
        let r = Resolvers::from_references(&refs);

        let mut s = spec(true);
        s.workflow = Some("Approve".into());
        let ws = encode_one("*", &s, r).unwrap();
        assert_eq!(ws.process_dn.as_deref(), Some("erglobalid=7,ou=workflow"));

        s.workflow = Some("Unknown".into());
        assert_eq!(
            encode_one("*", &s, r).unwrap_err().code().as_str(),
            "UNRESOLVED_REFERENCE"
        );

        assert!(encode_one("*", &spec(true), r).unwrap().process_dn.is_none());
    }

    #[test]
    fn specific_targets_go_through_the_service_resolver() {
        let mut refs = ResolvedReferences::new();
        refs.insert_service("Directorio Activo", "erglobalid=99,ou=services");
        let r = Resolvers::from_references(&refs);

        let ws = encode_one("Directorio Activo", &spec(false), r).unwrap();
        assert_eq!(ws.service_target.name, "erglobalid=99,ou=services");

        // profiles are never resolved
        refs.insert_service("ADprofile", "nope");
        let ws = encode_one("ADprofile", &spec(false), Resolvers::from_references(&refs)).unwrap();
        assert_eq!(ws.service_target.name, "ADprofile");
    }

    #[test]
    fn empty_parameters_encode_to_empty_container_and_decode_to_empty_map() {
        let ws = encode_one("*", &spec(false), Resolvers::pass_through()).unwrap();
        assert_eq!(
            ws.parameters,
            Some(WSProvisioningParameters { parameters: Some(ArrayOf::default()) })
        );

        let mut bare = ws.clone();
        bare.parameters = None;
        assert!(decode_one(&bare).unwrap().1.parameters.is_empty());

        bare.parameters = Some(WSProvisioningParameters { parameters: None });
        assert!(decode_one(&bare).unwrap().1.parameters.is_empty());
    }

    #[test]
    fn decode_keeps_stored_names() {
        let mut ws = encode_one("*", &spec(true), Resolvers::pass_through()).unwrap();
        ws.service_target = WSServiceTarget {
            name: "erglobalid=99,ou=services".into(),
            target_type: 1,
        };
        ws.process_dn = Some("erglobalid=7,ou=workflow".into());

        let (target, s) = decode_one(&ws).unwrap();
        assert_eq!(target, "erglobalid=99,ou=services");
        assert!(s.automatic);
        assert_eq!(s.workflow.as_deref(), Some("erglobalid=7,ou=workflow"));
    }

    #[test]
    fn repeated_attribute_merges_in_wire_order() {
        let mut ws = encode_one("*", &spec(false), Resolvers::pass_through()).unwrap();
        let first = parameter::encode("eradfax", &[ParameterValue::regex(Enforcement::Allowed, "a")]);
        let second =
            parameter::encode("eradfax", &[ParameterValue::constant(Enforcement::Default, ["b"])]);
        ws.parameters = Some(WSProvisioningParameters {
            parameters: Some(ArrayOf::new(vec![first, second])),
        });

        let (_, s) = decode_one(&ws).unwrap();
        assert_eq!(
            s.parameters["eradfax"],
            vec![
                ParameterValue::regex(Enforcement::Allowed, "a"),
                ParameterValue::constant(Enforcement::Default, ["b"]),
            ]
        );
    }

    #[test]
    fn list_order_follows_map_order() {
        let mut targets = PolicyEntitlements::new();
        targets.insert("zeta".into(), spec(false));
        targets.insert("*".into(), spec(true));
        targets.insert("alphaProfile".into(), spec(false));

        let list = encode(&targets, Resolvers::pass_through()).unwrap();
        let names: Vec<_> = list.item.iter().map(|e| e.service_target.name.as_str()).collect();
        assert_eq!(names, vec!["*", "alphaProfile", "zeta"]);

        let back = decode(&list).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["*", "alphaProfile", "zeta"]);
    }
}
