/*
 * builtin.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of mailheaderclean, a set of email header tools.
 *
 * mailheaderclean is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * mailheaderclean is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with mailheaderclean.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Built-in removal list used when no base override is configured.

/// Header names and `*` patterns removed by default. Order is significant: it is the order
/// in which the policy lists them.
pub const BUILTIN_REMOVAL_PATTERNS: &[&str] = &[
    // Microsoft Exchange / Office 365
    "X-MS-*",
    "X-Microsoft-*",
    "X-Forefront-*",
    "X-ClientProxiedBy",
    "X-EOPAttributedMessage",
    "msip_labels",
    "Thread-Index",
    "Thread-Topic",
    "Deferred-Delivery",
    // ARC and authentication results
    "ARC-*",
    "Authentication-Results*",
    "auto-submitted",
    // Organization
    "X-OriginatorOrg",
    "Organization",
    "X-Organization",
    "X-Country",
    // Client preferences
    "Accept-Language",
    "Content-Language",
    // Mail user agents
    "X-Mailer",
    "User-Agent",
    "X-Mailer-Version",
    "X-MimeOLE",
    "X-MSMail-Priority",
    // Priority
    "X-Priority",
    "Importance",
    "Priority",
    "Precedence",
    // Receipts
    "Disposition-Notification-To",
    "X-Confirm-Reading-To",
    "Return-Receipt-To",
    "X-Auto-Response-Suppress",
    // Security vendors
    "X-Proofpoint-*",
    "X-Mimecast-*",
    "X-IronPort-*",
    "X-Barracuda-*",
    "X-Sophos-*",
    "X-LASED-*",
    "X-Spampanel-*",
    "X-YourOrg-MailScanner*",
    "X-TM-AS-*",
    "X-Sonic*",
    "X-FireEye",
    "X-Amavis-Modified",
    "X-AntiAbuse",
    "X-Antivirus",
    "X-Antivirus-Status",
    "X-Virus-Scanned",
    // Mailbox providers
    "X-Google*",
    "X-Gm-*",
    "X-Yahoo-*",
    "X-YMail-*",
    "X-AOL-*",
    // Mailing lists
    "List-*",
    "X-BeenThere",
    "X-Mailman-Version",
    // Sender tracking
    "X-Originating-IP",
    "X-Sender-IP",
    "X-Get-Message-Sender-Via",
    "X-Originating-Email",
    "X-Authenticated-Sender",
    "X-Sender",
    "X-IP",
    // Filtering services
    "X-cloud-security*",
    "X-CMAE-*",
    "X-Greylist",
    "X-CodeTwo*",
    // Hosting providers
    "X-AliDM-RcptTo",
    "X-Postal-MsgID",
    "X-PPE-TRUSTED",
    "X-PPP-*",
    "X-SECURESERVER-ACCT",
    "X-SG-EID",
    "X-RSMIdSession",
    // Message tracking
    "X-Entity-ID",
    "X-EnvId",
    "X-Filter-ID",
    "X-MDID*",
    "Feedback-ID",
    "X-Forwarded-Encrypted",
    "X-Received",
    "X-Recommended-Action",
    "X-Report-Abuse-To",
    "X-Source*",
    // Obsolete or rarely used
    "Comments",
    "Keywords",
    "Resent-*",
    "Status",
    "X-Status",
    "X-UID",
    // Delivery metadata
    "Delivered-To",
    "Return-Path",
    "X-Original-To",
    // Signatures
    "DKIM-Signature",
    "DKIM-Filter",
    "Received-SPF",
    // Spam scoring
    "X-Spam-*",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn no_duplicate_entries() {
        let mut seen = HashSet::new();
        for p in BUILTIN_REMOVAL_PATTERNS {
            assert!(seen.insert(p.to_ascii_lowercase()), "duplicate entry {}", p);
        }
    }

    #[test]
    fn received_is_not_in_builtin_list() {
        assert!(!BUILTIN_REMOVAL_PATTERNS.iter().any(|p| p.eq_ignore_ascii_case("Received")));
    }
}
