/// Bucket stats series exported as gauges: (sample key, help text).
///
/// Keys match the `op.samples` object of `/pools/default/buckets/<name>/stats`
/// and double as metric name suffixes.
pub const TRACKED_FIELDS: &[(&str, &str)] = &[
    ("couch_total_disk_size", "The total size on disk of all data and view files for this bucket"),
    (
        "couch_docs_fragmentation",
        "How much fragmented data there is to be compacted compared to real data for the data files in this bucket",
    ),
    (
        "couch_views_fragmentation",
        "How much fragmented data there is to be compacted compared to real data for the view index files in this bucket",
    ),
    ("hit_ratio", "Hit ratio"),
    (
        "ep_cache_miss_rate",
        "Percentage of reads per second to this bucket from disk as opposed to RAM",
    ),
    ("ep_resident_items_rate", "Percentage of all items cached in RAM in this bucket"),
    ("vb_avg_active_queue_age", "Sum of disk queue item age in milliseconds"),
    (
        "vb_avg_replica_queue_age",
        "Average age in seconds of replica items in the replica item queue for this bucket",
    ),
    (
        "vb_avg_pending_queue_age",
        "Average age in seconds of pending items in the pending item queue for this bucket",
    ),
    (
        "vb_avg_total_queue_age",
        "Average age in seconds of all items in the disk write queue for this bucket",
    ),
    ("vb_active_resident_items_ratio", "Percentage of active items cached in RAM in this bucket"),
    ("vb_replica_resident_items_ratio", "Percentage of replica items cached in RAM in this bucket"),
    (
        "vb_pending_resident_items_ratio",
        "Percentage of items in pending state vbuckets cached in RAM in this bucket",
    ),
    (
        "avg_disk_update_time",
        "Average disk update time in microseconds as from disk_update histogram of timings",
    ),
    (
        "avg_disk_commit_time",
        "Average disk commit time in seconds as from disk_update histogram of timings",
    ),
    ("avg_bg_wait_time", "Average background fetch time in microseconds"),
    (
        "avg_active_timestamp_drift",
        "Average drift (in seconds) between mutation timestamps and the local time for active vBuckets",
    ),
    (
        "avg_replica_timestamp_drift",
        "Average drift (in seconds) between mutation timestamps and the local time for replica vBuckets",
    ),
    ("bytes_read", "Bytes read"),
    ("bytes_written", "Bytes written"),
    ("cas_badval", "Compare and Swap bad values"),
    ("cas_hits", "Number of operations with a CAS id per second for this bucket"),
    ("cas_misses", "Compare and Swap misses"),
    ("cmd_get", "Number of reads (get operations) per second from this bucket"),
    ("cmd_set", "Number of writes (set operations) per second to this bucket"),
    (
        "couch_docs_actual_disk_size",
        "The size of all data files for this bucket, including the data itself, meta data and temporary files",
    ),
    ("couch_docs_data_size", "The size of active data in this bucket"),
    ("couch_docs_disk_size", "The size of all data files for this bucket"),
    (
        "couch_views_actual_disk_size",
        "The size of all active items in all the indexes for this bucket on disk",
    ),
    ("couch_views_data_size", "The size of active data on for all the indexes in this bucket"),
    ("couch_views_ops", "All the view reads for all design documents including scatter gather"),
    (
        "curr_connections",
        "Number of connections to this server including connections from external client SDKs, proxies, DCP requests and internal statistic gathering",
    ),
    ("curr_items", "Number of unique items in this bucket - only active items, not replica"),
    ("curr_items_tot", "Total number of items in this bucket"),
    ("decr_hits", "Decrement hits"),
    ("decr_misses", "Decrement misses"),
    ("delete_hits", "Number of delete operations per second for this bucket"),
    ("delete_misses", "Delete misses"),
    ("disk_commit_count", "Disk commits"),
    ("disk_update_count", "Disk updates"),
    ("disk_write_queue", "Number of items waiting to be written to disk in this bucket"),
    ("ep_active_ahead_exceptions", "Total number of ahead exceptions for all active vBuckets"),
    ("ep_active_hlc_drift", "Total drift of active vBucket HLCs"),
    ("ep_bg_fetched", "Number of reads per second from disk for this bucket"),
    (
        "ep_clock_cas_drift_threshold_exceeded",
        "Number of times the CAS drift threshold was exceeded",
    ),
    ("ep_dcp_2i_backoff", "Number of backoffs for indexes DCP connections"),
    ("ep_dcp_2i_count", "Number of indexes DCP connections"),
    ("ep_dcp_2i_items_remaining", "Number of indexes items remaining to be sent"),
    ("ep_dcp_2i_items_sent", "Number of indexes items sent"),
    ("ep_dcp_2i_producer_count", "Number of indexes producers"),
    ("ep_dcp_2i_total_backlog_size", "Total backlog size of indexes DCP connections"),
    ("ep_dcp_2i_total_bytes", "Number bytes per second being sent for indexes DCP connections"),
    ("ep_dcp_other_backoff", "Number of backoffs for other DCP connections"),
    ("ep_dcp_other_count", "Number of other DCP connections"),
    (
        "ep_dcp_other_items_remaining",
        "Number of items remaining to be sent to other DCP connections",
    ),
    ("ep_dcp_other_items_sent", "Number of items per second being sent for other DCP connections"),
    ("ep_dcp_other_producer_count", "Number of other senders for this bucket"),
    ("ep_dcp_other_total_backlog_size", "Total backlog size of other DCP connections"),
    ("ep_dcp_other_total_bytes", "Number of bytes per second being sent for other DCP connections"),
    ("ep_dcp_replica_backoff", "Number of backoffs for replication DCP connections"),
    ("ep_dcp_replica_count", "Number of internal replication DCP connections in this bucket"),
    (
        "ep_dcp_replica_items_remaining",
        "Number of items remaining to be sent to consumer in this bucket",
    ),
    (
        "ep_dcp_replica_items_sent",
        "Number of items per second being sent for a producer for this bucket",
    ),
    ("ep_dcp_replica_producer_count", "Number of replication senders for this bucket"),
    ("ep_dcp_replica_total_backlog_size", "Total backlog size of replication DCP connections"),
    (
        "ep_dcp_replica_total_bytes",
        "Number of bytes per second being sent for replication DCP connections",
    ),
    ("ep_dcp_views_backoff", "Number of backoffs for views DCP connections"),
    ("ep_dcp_views_count", "Number of views DCP connections"),
    ("ep_dcp_views_items_remaining", "Number of views items remaining to be sent"),
    ("ep_dcp_views_items_sent", "Number of views items sent"),
    ("ep_dcp_views_producer_count", "Number of views producers"),
    ("ep_dcp_views_total_backlog_size", "Total backlog size of views DCP connections"),
    ("ep_dcp_views_total_bytes", "Number bytes per second being sent for views DCP connections"),
    ("ep_dcp_xdcr_backoff", "Number of backoffs for XDCR DCP connections"),
    ("ep_dcp_xdcr_count", "Number of internal XDCR DCP connections in this bucket"),
    (
        "ep_dcp_xdcr_items_remaining",
        "Number of items remaining to be sent to consumer in this bucket",
    ),
    (
        "ep_dcp_xdcr_items_sent",
        "Number of items per second being sent for a producer for this bucket",
    ),
    ("ep_dcp_xdcr_producer_count", "Number of XDCR senders for this bucket"),
    ("ep_dcp_xdcr_total_backlog_size", "Total backlog size of XDCR DCP connections"),
    ("ep_dcp_xdcr_total_bytes", "Number of bytes per second being sent for XDCR DCP connections"),
    ("ep_diskqueue_drain", "Total number of items per second being written to disk in this bucket"),
    (
        "ep_diskqueue_fill",
        "Total number of items per second being put on the disk queue in this bucket",
    ),
    ("ep_diskqueue_items", "Total number of items waiting to be written to disk in this bucket"),
    ("ep_flusher_todo", "Number of items currently being written"),
    (
        "ep_item_commit_failed",
        "Number of times a transaction failed to commit due to storage errors",
    ),
    ("ep_kv_size", "Total amount of user data cached in RAM in this bucket"),
    ("ep_max_size", "The maximum amount of memory this bucket can use"),
    ("ep_mem_high_wat", "High water mark for auto-evictions"),
    ("ep_mem_low_wat", "Low water mark for auto-evictions"),
    ("ep_meta_data_memory", "Total amount of item metadata consuming RAM in this bucket"),
    ("ep_num_non_resident", "Number of non-resident items"),
    (
        "ep_num_ops_del_meta",
        "Number of delete operations per second for this bucket as the target for XDCR",
    ),
    (
        "ep_num_ops_del_ret_meta",
        "Number of delRetMeta operations per second for this bucket as the target for XDCR",
    ),
    (
        "ep_num_ops_get_meta",
        "Number of metadata read operations per second for this bucket as the target for XDCR",
    ),
    (
        "ep_num_ops_set_meta",
        "Number of set operations per second for this bucket as the target for XDCR",
    ),
    (
        "ep_num_ops_set_ret_meta",
        "Number of setRetMeta operations per second for this bucket as the target for XDCR",
    ),
    (
        "ep_num_value_ejects",
        "Total number of items per second being ejected to disk in this bucket",
    ),
    ("ep_oom_errors", "Number of times unrecoverable OOMs happened while processing operations"),
    ("ep_ops_create", "Total number of new items being inserted into this bucket"),
    ("ep_ops_update", "Number of items updated on disk per second for this bucket"),
    ("ep_overhead", "Extra memory used by transient data like persistence queues or checkpoints"),
    ("ep_queue_size", "Number of items queued for storage"),
    ("ep_replica_ahead_exceptions", "Total number of ahead exceptions for all replica vBuckets"),
    ("ep_replica_hlc_drift", "Total drift of replica vBucket HLCs"),
    (
        "ep_tmp_oom_errors",
        "Number of back-offs sent per second to client SDKs due to OOM situations from this bucket",
    ),
    ("ep_vb_total", "Total number of vBuckets for this bucket"),
    ("evictions", "Number of evictions"),
    ("get_hits", "Number of get hits"),
    ("get_misses", "Number of get misses"),
    ("incr_hits", "Number of increment hits"),
    ("incr_misses", "Number of increment misses"),
    ("mem_used", "Amount of memory used"),
    ("misses", "Number of misses"),
    ("ops", "Total amount of operations per second to this bucket"),
    (
        "vb_active_eject",
        "Number of items per second being ejected to disk from active vBuckets in this bucket",
    ),
    ("vb_active_itm_memory", "Amount of active user data cached in RAM in this bucket"),
    ("vb_active_meta_data_memory", "Amount of active item metadata consuming RAM in this bucket"),
    ("vb_active_num", "Number of vBuckets in the active state for this bucket"),
    (
        "vb_active_num_non_resident",
        "Number of non resident vBuckets in the active state for this bucket",
    ),
    (
        "vb_active_ops_create",
        "New items per second being inserted into active vBuckets in this bucket",
    ),
    (
        "vb_active_ops_update",
        "Number of items updated on active vBucket per second for this bucket",
    ),
    ("vb_active_queue_age", "Sum of disk queue item age in milliseconds"),
    (
        "vb_active_queue_drain",
        "Number of active items per second being written to disk in this bucket",
    ),
    (
        "vb_active_queue_fill",
        "Number of active items per second being put on the active item disk queue in this bucket",
    ),
    ("vb_active_queue_size", "Number of active items waiting to be written to disk in this bucket"),
    (
        "vb_pending_curr_items",
        "Number of items in pending vBuckets in this bucket and should be transient during rebalancing",
    ),
    (
        "vb_pending_eject",
        "Number of items per second being ejected to disk from pending vBuckets in this bucket and should be transient during rebalancing",
    ),
    (
        "vb_pending_itm_memory",
        "Amount of pending user data cached in RAM in this bucket and should be transient during rebalancing",
    ),
    (
        "vb_pending_meta_data_memory",
        "Amount of pending item metadata consuming RAM in this bucket and should be transient during rebalancing",
    ),
    (
        "vb_pending_num",
        "Number of vBuckets in the pending state for this bucket and should be transient during rebalancing",
    ),
    (
        "vb_pending_num_non_resident",
        "Number of non resident vBuckets in the pending state for this bucket",
    ),
    (
        "vb_pending_ops_create",
        "New items per second being instead into pending vBuckets in this bucket and should be transient during rebalancing",
    ),
    (
        "vb_pending_ops_update",
        "Number of items updated on pending vBucket per second for this bucket",
    ),
    ("vb_pending_queue_age", "Sum of disk pending queue item age in milliseconds"),
    (
        "vb_pending_queue_drain",
        "Number of pending items per second being written to disk in this bucket and should be transient during rebalancing",
    ),
    (
        "vb_pending_queue_fill",
        "Number of pending items per second being put on the pending item disk queue in this bucket and should be transient during rebalancing",
    ),
    (
        "vb_pending_queue_size",
        "Number of pending items waiting to be written to disk in this bucket and should be transient during rebalancing",
    ),
    ("vb_replica_curr_items", "Number of items in replica vBuckets in this bucket"),
    (
        "vb_replica_eject",
        "Number of items per second being ejected to disk from replica vBuckets in this bucket",
    ),
    ("vb_replica_itm_memory", "Amount of replica user data cached in RAM in this bucket"),
    (
        "vb_replica_meta_data_memory",
        "Amount of replica item metadata consuming in RAM in this bucket",
    ),
    ("vb_replica_num", "Number of vBuckets in the replica state for this bucket"),
    (
        "vb_replica_num_non_resident",
        "Number of non resident vBuckets in the replica state for this bucket",
    ),
    (
        "vb_replica_ops_create",
        "New items per second being inserted into replica vBuckets in this bucket",
    ),
    (
        "vb_replica_ops_update",
        "Number of items updated on replica vBucket per second for this bucket",
    ),
    ("vb_replica_queue_age", "Sum of disk replica queue item age in milliseconds"),
    (
        "vb_replica_queue_drain",
        "Number of replica items per second being written to disk in this bucket",
    ),
    (
        "vb_replica_queue_fill",
        "Number of replica items per second being put on the replica item disk queue in this bucket",
    ),
    (
        "vb_replica_queue_size",
        "Number of replica items waiting to be written to disk in this bucket",
    ),
    ("vb_total_queue_age", "Sum of disk queue item age in milliseconds"),
    ("xdc_ops", "Total XDCR operations per second for this bucket"),
    ("cpu_idle_ms", "CPU idle milliseconds"),
    ("cpu_local_ms", "CPU local milliseconds"),
    ("cpu_utilization_rate", "Percentage of CPU in use across all available cores on this server"),
    ("hibernated_requests", "Number of streaming requests on port 8091 now idle"),
    ("hibernated_waked", "Rate of streaming request wakeups on port 8091"),
    ("mem_actual_free", "Amount of RAM available on this server"),
    ("mem_actual_used", "Amount of RAM used on this server"),
    ("mem_free", "Amount of Memory free"),
    ("mem_total", "Total amount of memory available"),
    ("mem_used_sys", "System memory in use"),
    ("rest_requests", "Rate of http requests on port 8091"),
    ("swap_total", "Total amount of swap available"),
    ("swap_used", "Amount of swap space in use on this server"),
];

/// Bucket summary values from `basicStats` of `/pools/default/buckets`:
/// (metric name suffix, help text).
pub const BASIC_STATS_FIELDS: &[(&str, &str)] = &[
    ("quota_percent_used", "Percentage of the RAM quota in use by this bucket"),
    ("ops_per_sec", "Operations per second on this bucket"),
    ("disk_fetches", "Number of disk fetches per second for this bucket"),
    ("item_count", "Number of items in this bucket"),
    ("disk_used", "Disk space used by this bucket in bytes"),
    ("data_used", "Size of the data files of this bucket in bytes"),
    ("mem_used", "Memory used by this bucket in bytes"),
    (
        "vb_active_num_non_resident",
        "Number of non-resident items in the active vBuckets of this bucket",
    ),
];
