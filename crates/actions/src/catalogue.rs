// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the concrete executor registry for every action name in the
//! closed catalogue (`ntn_scenario::schema::ACTIONS`). One entry per
//! action; a missing mapping here is a bug, not something resolved at
//! dispatch time, so `Dispatcher` tests assert every catalogue name
//! resolves to an executor.

use crate::actions::{acl, bgp, evpn, interface, portchannel, provisioning, qos, route, service, utility, verify, vlan, vrf};
use crate::executor::Executor;
use ntn_core::Clock;
use ntn_device::RemoteShell;
use std::collections::HashMap;
use std::sync::Arc;

pub fn build_registry<C: Clock + 'static>(shell: Arc<dyn RemoteShell>) -> HashMap<&'static str, Box<dyn Executor<C>>> {
    let mut m: HashMap<&'static str, Box<dyn Executor<C>>> = HashMap::new();

    // provisioning
    m.insert("provision", Box::new(provisioning::Provision));
    m.insert("configure-loopback", Box::new(provisioning::ConfigureLoopback));
    m.insert("apply-frr-defaults", Box::new(provisioning::ApplyFrrDefaults));
    m.insert("deprovision", Box::new(provisioning::Deprovision));
    m.insert("remove-loopback", Box::new(provisioning::RemoveLoopback));
    m.insert("remove-frr-defaults", Box::new(provisioning::RemoveFrrDefaults));

    // verification
    m.insert("verify-ping", Box::new(verify::VerifyPing::new(Arc::clone(&shell))));
    m.insert("verify-bgp", Box::new(verify::VerifyBgp::new(Arc::clone(&shell))));
    m.insert("verify-health", Box::new(verify::VerifyHealth));
    m.insert("verify-route", Box::new(verify::VerifyRoute));
    m.insert("verify-config-db", Box::new(verify::VerifyConfigDb));
    m.insert("verify-state-db", Box::new(verify::VerifyStateDb));

    // VLAN
    m.insert("create-vlan", Box::new(vlan::CreateVlan));
    m.insert("delete-vlan", Box::new(vlan::DeleteVlan));
    m.insert("add-vlan-member", Box::new(vlan::AddVlanMember));
    m.insert("remove-vlan-member", Box::new(vlan::RemoveVlanMember));

    // VRF
    m.insert("create-vrf", Box::new(vrf::CreateVrf));
    m.insert("delete-vrf", Box::new(vrf::DeleteVrf));
    m.insert("set-interface-vrf", Box::new(vrf::SetInterfaceVrf));

    // EVPN
    m.insert("setup-evpn", Box::new(evpn::SetupEvpn));
    m.insert("bind-ipvpn", Box::new(evpn::BindIpvpn));
    m.insert("unbind-ipvpn", Box::new(evpn::UnbindIpvpn));
    m.insert("bind-macvpn", Box::new(evpn::BindMacvpn));
    m.insert("unbind-macvpn", Box::new(evpn::UnbindMacvpn));
    m.insert("teardown-evpn", Box::new(evpn::TeardownEvpn));

    // service
    m.insert("apply-service", Box::new(service::ApplyService));
    m.insert("remove-service", Box::new(service::RemoveService));
    m.insert("refresh-service", Box::new(service::RefreshService));

    // QoS
    m.insert("configure-qos", Box::new(qos::ConfigureQos));

    // BGP
    m.insert("configure-bgp", Box::new(bgp::ConfigureBgp));
    m.insert("bgp-add-neighbor", Box::new(bgp::BgpAddNeighbor));
    m.insert("bgp-remove-neighbor", Box::new(bgp::BgpRemoveNeighbor));
    m.insert("remove-bgp-globals", Box::new(bgp::RemoveBgpGlobals));

    // ACL
    m.insert("acl-create", Box::new(acl::AclCreate));
    m.insert("acl-delete", Box::new(acl::AclDelete));
    m.insert("acl-add-rule", Box::new(acl::AclAddRule));
    m.insert("acl-delete-rule", Box::new(acl::AclDeleteRule));
    m.insert("acl-bind", Box::new(acl::AclBind));
    m.insert("acl-unbind", Box::new(acl::AclUnbind));

    // LAG
    m.insert("create-port-channel", Box::new(portchannel::CreatePortChannel));
    m.insert("delete-port-channel", Box::new(portchannel::DeletePortChannel));

    // interface properties
    m.insert("set-interface", Box::new(interface::SetInterface));

    // static routing
    m.insert("add-static-route", Box::new(route::AddStaticRoute));
    m.insert("remove-static-route", Box::new(route::RemoveStaticRoute));

    // host-side
    m.insert("host-exec", Box::new(utility::HostExec));

    // utility
    m.insert("wait", Box::new(utility::Wait));
    m.insert("cleanup", Box::new(utility::Cleanup));
    m.insert("ssh-command", Box::new(utility::SshCommand::new(Arc::clone(&shell))));
    m.insert("restart-service", Box::new(utility::RestartService::new(Arc::clone(&shell))));

    m
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
