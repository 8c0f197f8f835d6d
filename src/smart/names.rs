/*!
Names for SMART attributes, as used in perfdata labels.

Names are lowercase, with words separated by underscores, so they are safe to use in perfdata without quoting. Attributes that are not listed here are called `unknown`.
*/

use std::collections::HashMap;

/// Name for every attribute not in `NAMES`
pub const UNKNOWN: &str = "unknown";

// Meaning of quite a few of these depends on vendor and even model; names here are what the majority of drives mean by them
static NAMES: &[(u8, &str)] = &[
	(1, "read_error_rate"),
	(2, "throughput_performance"),
	(3, "spin_up_time"),
	(4, "start_stop_count"),
	(5, "reallocated_sectors_count"),
	(6, "read_channel_margin"),
	(7, "seek_error_rate"),
	(8, "seek_time_performance"),
	(9, "power_on_hours"),
	(10, "spin_retry_count"),
	(11, "recalibration_retries"),
	(12, "power_cycle_count"),
	(13, "soft_read_error_rate"),
	(24, "current_helium_level"),

	// mostly SSDs
	(170, "available_reserved_space"),
	(171, "ssd_program_fail_count"),
	(172, "ssd_erase_fail_count"),
	(173, "ssd_wear_leveling_count"),
	(174, "unexpected_power_loss_count"),
	(175, "power_loss_protection_failure"),
	(176, "erase_fail_count"),
	(177, "wear_range_delta"),
	(179, "used_reserved_block_count_total"),
	(180, "unused_reserved_block_count_total"),
	(181, "program_fail_count_total"),
	(182, "erase_fail_count"),
	(183, "sata_downshift_error_count"),
	(184, "end_to_end_error"),
	(185, "head_stability"),
	(186, "induced_op_vibration_detection"),
	(187, "reported_uncorrectable_errors"),
	(188, "command_timeout"),
	(189, "high_fly_writes"),
	(190, "airflow_temperature"),
	(191, "g_sense_error_rate"),

	(192, "power_off_retract_count"),
	(193, "load_cycle_count"),
	(194, "temperature"),
	(195, "hardware_ecc_recovered"),
	(196, "reallocation_event_count"),
	(197, "current_pending_sector_count"),
	(198, "uncorrectable_sector_count"),
	(199, "ultradma_crc_error_count"),
	(200, "multi_zone_error_rate"),
	(201, "soft_read_error_rate"),
	(202, "data_address_mark_errors"),
	(203, "run_out_cancel"),
	(204, "soft_ecc_correction"),
	(205, "thermal_asperity_rate"),
	(206, "flying_height"),
	(207, "spin_height_current"),
	(208, "spin_buzz"),
	(209, "offline_seek_performance"),
	(210, "vibration_during_write"),
	(211, "vibration_during_write"),
	(212, "shock_during_write"),

	(220, "disk_shift"),
	(221, "g_sense_error_rate"),
	(222, "loaded_hours"),
	(223, "load_unload_retry_count"),
	(224, "load_friction"),
	(225, "load_unload_cycle_count"),
	(226, "load_in_time"),
	(227, "torque_amplification_count"),
	(228, "power_off_retract_cycle"),
	(230, "drive_life_protection_status"),
	(231, "temperature"),
	(232, "available_reserved_space"),
	(233, "media_wearout_indicator"),
	(234, "average_erase_count"),
	(235, "good_block_count"),

	(240, "flying_head_hours"),
	(241, "total_lbas_written"),
	(242, "total_lbas_read"),
	(243, "total_lbas_written_expanded"),
	(244, "total_lbas_read_expanded"),
	(249, "nand_writes_1gib"),
	(250, "read_error_retry_rate"),
	(251, "minimum_spares_remaining"),
	(252, "newly_added_bad_flash_block"),
	(254, "free_fall_protection"),
];

lazy_static! {
	static ref BY_ID: HashMap<u8, &'static str> = NAMES.iter().cloned().collect();
}

pub fn name(id: u8) -> &'static str {
	BY_ID.get(&id).cloned().unwrap_or(UNKNOWN)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known() {
		assert_eq!(name(1), "read_error_rate");
		assert_eq!(name(5), "reallocated_sectors_count");
		assert_eq!(name(9), "power_on_hours");
		assert_eq!(name(24), "current_helium_level");
		assert_eq!(name(194), "temperature");
		assert_eq!(name(197), "current_pending_sector_count");
		assert_eq!(name(254), "free_fall_protection");
	}

	#[test]
	fn unknown() {
		for &id in &[0, 14, 100, 178, 213, 229, 245, 253, 255] {
			assert_eq!(name(id), UNKNOWN, "attribute {}", id);
		}
	}

	#[test]
	fn table_is_sane() {
		assert_eq!(BY_ID.len(), NAMES.len());
		assert!(NAMES.windows(2).all(|w| w[0].0 < w[1].0));
		for &(_, n) in NAMES {
			assert!(n.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'), "{}", n);
		}
	}
}
